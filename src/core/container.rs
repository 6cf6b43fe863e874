//! # Blog Container
//!
//! The top-level controller behind the tabbed screen. It owns the four tab
//! slots, knows which one is active, and is the only thing that reads or
//! writes the saved [`TabState`].
//!
//! ```text
//!                 activate()                 suspend()
//! Uninitialized ─────────────▶ Active ─────────────────▶ Backgrounded
//!   (restore once)              │  ▲                          │
//!                               │  └──────────────────────────┘
//!                               │           resume()
//!                               └─ select_tab / reselect / source changed
//! ```
//!
//! Restoration happens on the Uninitialized → Active edge only, so duplicate
//! activation signals never replay it.

use log::{debug, info, warn};

use crate::core::slot::{SLOT_COUNT, SlotController, TabSlot};
use crate::core::source::{ContentSource, ContentSourceRegistry, Subscription};
use crate::core::store::{StateStore, StoreError};
use crate::core::tab_state::TabState;

/// Store key for the saved tab state.
pub const TAB_STATE_KEY: &str = "blog_container.tab_state";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Active,
    Backgrounded,
}

/// What a `select_tab` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Switched { from: TabSlot, to: TabSlot },
    Reselected(TabSlot),
    /// Index outside the slot range.
    Ignored,
}

pub struct BlogContainer<C: SlotController> {
    slots: [C; SLOT_COUNT],
    active: usize,
    lifecycle: Lifecycle,
    source: ContentSource,
    store: Box<dyn StateStore>,
    state_key: String,
    subscription: Option<Subscription>,
}

impl<C: SlotController> BlogContainer<C> {
    /// `slots` are in [`TabSlot::ALL`] order.
    pub fn new(slots: [C; SLOT_COUNT], source: ContentSource, store: Box<dyn StateStore>) -> Self {
        Self {
            slots,
            active: 0,
            lifecycle: Lifecycle::Uninitialized,
            source,
            store,
            state_key: TAB_STATE_KEY.to_string(),
            subscription: None,
        }
    }

    pub fn with_state_key(mut self, key: impl Into<String>) -> Self {
        self.state_key = key.into();
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_slot(&self) -> TabSlot {
        TabSlot::ALL[self.active]
    }

    pub fn source(&self) -> &ContentSource {
        &self.source
    }

    pub fn slot(&self, slot: TabSlot) -> &C {
        &self.slots[slot.index()]
    }

    pub fn slot_mut(&mut self, slot: TabSlot) -> &mut C {
        &mut self.slots[slot.index()]
    }

    pub fn active_controller(&self) -> &C {
        &self.slots[self.active]
    }

    pub fn active_controller_mut(&mut self) -> &mut C {
        &mut self.slots[self.active]
    }

    pub fn slots(&self) -> impl Iterator<Item = (TabSlot, &C)> {
        TabSlot::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn slots_mut(&mut self) -> impl Iterator<Item = (TabSlot, &mut C)> {
        TabSlot::ALL.into_iter().zip(self.slots.iter_mut())
    }

    pub fn navigation_depths(&self) -> [usize; SLOT_COUNT] {
        let mut depths = [0; SLOT_COUNT];
        for (depth, slot) in depths.iter_mut().zip(self.slots.iter()) {
            *depth = slot.current_navigation_depth();
        }
        depths
    }

    /// The record `save_state` would write right now.
    pub fn snapshot(&self) -> TabState {
        TabState::capture(
            self.active,
            self.navigation_depths(),
            Some(self.source.id.clone()),
        )
    }

    // ------------------------------------------------------------------------
    // Registry wiring
    // ------------------------------------------------------------------------

    /// Subscribe to source changes. If the registry has moved on from the
    /// source this container was built with, catch up immediately.
    pub fn attach(&mut self, registry: &mut ContentSourceRegistry) {
        if let Some(old) = self.subscription.take() {
            registry.unsubscribe(old.id);
        }
        self.subscription = Some(registry.subscribe());
        if registry.current().id != self.source.id {
            self.on_content_source_changed(registry.current().clone());
        }
    }

    pub fn detach(&mut self, registry: &mut ContentSourceRegistry) {
        if let Some(sub) = self.subscription.take() {
            registry.unsubscribe(sub.id);
            debug!("Container unsubscribed from content source changes");
        }
    }

    /// Apply every pending source-change notification, oldest first.
    /// Returns how many were applied.
    pub fn process_notifications(&mut self) -> usize {
        let pending: Vec<ContentSource> = match &self.subscription {
            Some(sub) => sub.receiver.try_iter().collect(),
            None => return 0,
        };
        let count = pending.len();
        for source in pending {
            self.on_content_source_changed(source);
        }
        count
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Called whenever the container becomes visible.
    pub fn activate(&mut self) {
        match self.lifecycle {
            Lifecycle::Uninitialized => {
                self.restore_state();
                self.lifecycle = Lifecycle::Active;
                info!(
                    "Container active on {} (blog '{}')",
                    self.active_slot().label(),
                    self.source.id
                );
            }
            Lifecycle::Backgrounded => {
                self.lifecycle = Lifecycle::Active;
                debug!("Container resumed, keeping in-memory tab state");
            }
            Lifecycle::Active => {}
        }
    }

    pub fn resume(&mut self) {
        self.activate();
    }

    /// Save and go to the background.
    ///
    /// The lifecycle moves to Backgrounded even if the write fails; losing
    /// the saved position is acceptable, the error is returned so the caller
    /// can log or retry.
    pub fn suspend(&mut self) -> Result<(), StoreError> {
        match self.lifecycle {
            Lifecycle::Active => {
                self.lifecycle = Lifecycle::Backgrounded;
                self.save_state()
            }
            // Nothing restored yet, so saving would overwrite the last
            // session's record with defaults.
            Lifecycle::Uninitialized => Ok(()),
            Lifecycle::Backgrounded => Ok(()),
        }
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Route a tab tap. Tapping the active tab pops it back to its root.
    pub fn select_tab(&mut self, index: usize) -> Selection {
        let Some(to) = TabSlot::from_index(index) else {
            warn!("Ignoring selection of tab index {} (have {})", index, SLOT_COUNT);
            return Selection::Ignored;
        };
        // A tap means we are in the foreground, so the next suspend must save.
        match self.lifecycle {
            Lifecycle::Uninitialized => {
                debug!("Tab selected before activation, activating first");
                self.activate();
            }
            Lifecycle::Backgrounded => {
                debug!("Tab selected while backgrounded, resuming first");
                self.resume();
            }
            Lifecycle::Active => {}
        }

        if index == self.active {
            self.reselect();
            return Selection::Reselected(to);
        }

        let from = self.active_slot();
        self.active = index;
        debug!("Switched tab {} -> {}", from.label(), to.label());
        Selection::Switched { from, to }
    }

    /// Pop the active tab to its root. Does nothing when already there.
    pub fn reselect(&mut self) {
        let slot = self.active_slot();
        let controller = &mut self.slots[self.active];
        let depth = controller.current_navigation_depth();
        if depth == 0 {
            return;
        }
        controller.reset_to_root();
        debug!("Reselected {}: popped {} level(s)", slot.label(), depth);
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    pub fn save_state(&mut self) -> Result<(), StoreError> {
        let state = self.snapshot();
        let json = state.to_json().map_err(StoreError::Encode)?;
        match self.store.write(&self.state_key, &json) {
            Ok(()) => {
                debug!(
                    "Saved tab state: {} at depths {:?}",
                    state.active_slot().label(),
                    state.navigation_depths
                );
                Ok(())
            }
            Err(e) => {
                warn!("Failed to save tab state: {}", e);
                Err(e)
            }
        }
    }

    /// Load the saved tab state and re-apply it. Anything missing or broken
    /// falls back to the first tab with every tab at its root.
    pub fn restore_state(&mut self) {
        let state = match self.store.read(&self.state_key) {
            Ok(Some(json)) => match TabState::from_json(&json) {
                Ok(state) => state,
                Err(e) => {
                    warn!("Saved tab state is malformed, using defaults: {}", e);
                    TabState::default()
                }
            },
            Ok(None) => {
                debug!("No saved tab state, using defaults");
                TabState::default()
            }
            Err(e) => {
                warn!("Could not read saved tab state, using defaults: {}", e);
                TabState::default()
            }
        };
        self.apply(state);
    }

    /// Forget the saved tab state. In-memory state is untouched.
    pub fn clear_state(&mut self) -> Result<(), StoreError> {
        self.store.remove(&self.state_key)?;
        info!("Cleared saved tab state");
        Ok(())
    }

    fn apply(&mut self, state: TabState) {
        if state.active_slot_index >= SLOT_COUNT {
            warn!(
                "Saved tab index {} out of range, clamping to 0",
                state.active_slot_index
            );
        }
        let mut state = state.clamped();

        if let Some(saved_source) = &state.source_id
            && *saved_source != self.source.id
        {
            info!(
                "Saved navigation belongs to blog '{}', not '{}'; starting tabs at root",
                saved_source, self.source.id
            );
            state.navigation_depths = [0; SLOT_COUNT];
        }

        if state.saved_at > 0
            && let Some(saved) = chrono::DateTime::from_timestamp(state.saved_at, 0)
        {
            debug!("Restoring tab state saved at {}", saved.to_rfc3339());
        }

        self.active = state.active_slot_index;
        for (controller, depth) in self.slots.iter_mut().zip(state.navigation_depths) {
            controller.restore_to_depth(depth);
        }
    }

    // ------------------------------------------------------------------------
    // Source changes
    // ------------------------------------------------------------------------

    /// The blog changed underneath us. Every tab's navigation belongs to the
    /// old blog, so each one goes back to root and reloads.
    pub fn on_content_source_changed(&mut self, source: ContentSource) {
        info!(
            "Reloading {} tabs for blog '{}' (was '{}')",
            SLOT_COUNT, source.id, self.source.id
        );
        for controller in self.slots.iter_mut() {
            controller.reset_to_root();
            controller.reload_for_source(&source);
        }
        self.source = source;
    }
}
