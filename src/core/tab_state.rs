//! # Tab State
//!
//! The record the container writes on suspend and reads back once on the
//! next launch.
//!
//! ```json
//! {"activeSlotIndex": 1, "navigationDepths": [0, 2, 0, 0], "sourceId": "main", "savedAt": 1760000000}
//! ```
//!
//! `sourceId` and `savedAt` are optional on read so older records still load.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::slot::{SLOT_COUNT, TabSlot};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabState {
    pub active_slot_index: usize,
    pub navigation_depths: [usize; SLOT_COUNT],
    /// Blog the depths were recorded against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Unix timestamp of the save.
    #[serde(default)]
    pub saved_at: i64,
}

impl TabState {
    /// Snapshot taken right now.
    pub fn capture(
        active_slot_index: usize,
        navigation_depths: [usize; SLOT_COUNT],
        source_id: Option<String>,
    ) -> Self {
        Self {
            active_slot_index,
            navigation_depths,
            source_id,
            saved_at: Utc::now().timestamp(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// An active index outside the slot range (stale or hand-edited record)
    /// goes back to the first tab.
    pub fn clamped(mut self) -> Self {
        if self.active_slot_index >= SLOT_COUNT {
            self.active_slot_index = 0;
        }
        self
    }

    pub fn active_slot(&self) -> TabSlot {
        TabSlot::from_index(self.active_slot_index).unwrap_or(TabSlot::Posts)
    }
}
