//! # Tab Slots
//!
//! The fixed, ordered set of tabs hosted by the blog container, and the
//! capability set every tab's content controller has to provide.
//!
//! ```text
//! index  slot
//! 0      Posts
//! 1      Pages
//! 2      Comments
//! 3      Stats
//! ```

use serde::{Deserialize, Serialize};

use crate::core::source::ContentSource;

/// Number of tabs the container hosts. Never changes after construction.
pub const SLOT_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabSlot {
    Posts,
    Pages,
    Comments,
    Stats,
}

impl TabSlot {
    /// All slots in tab-bar order.
    pub const ALL: [TabSlot; SLOT_COUNT] = [
        TabSlot::Posts,
        TabSlot::Pages,
        TabSlot::Comments,
        TabSlot::Stats,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<TabSlot> {
        Self::ALL.get(index).copied()
    }

    /// Tab bar title.
    pub fn label(self) -> &'static str {
        match self {
            TabSlot::Posts => "Posts",
            TabSlot::Pages => "Pages",
            TabSlot::Comments => "Comments",
            TabSlot::Stats => "Stats",
        }
    }
}

/// What the container needs from each tab's content controller.
///
/// The container never reconstructs a tab's intermediate views itself. It
/// only knows how many levels deep a tab is, and asks the tab to get back
/// there.
pub trait SlotController {
    /// Pop every pushed view, leaving the tab at its root list.
    fn reset_to_root(&mut self);

    /// How many levels have been pushed on top of the root.
    fn current_navigation_depth(&self) -> usize;

    /// Re-push navigation until the tab is `depth` levels deep.
    fn restore_to_depth(&mut self, depth: usize);

    /// Drop cached content and load again for `source`.
    fn reload_for_source(&mut self, source: &ContentSource);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_slots_are_in_index_order() {
        for (i, slot) in TabSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
            assert_eq!(TabSlot::from_index(i), Some(*slot));
        }
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(TabSlot::from_index(SLOT_COUNT), None);
        assert_eq!(TabSlot::from_index(usize::MAX), None);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<&str> = TabSlot::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Posts", "Pages", "Comments", "Stats"]);
    }
}
