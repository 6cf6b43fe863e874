//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use crate::core::container::BlogContainer;
use crate::core::slot::{SLOT_COUNT, SlotController};
use crate::core::source::ContentSource;
use crate::core::store::{MemoryStore, StateStore, StoreError};

/// A tab controller that only records what the container asked of it.
#[derive(Debug, Default)]
pub struct RecordingSlot {
    pub depth: usize,
    pub resets: usize,
    pub restores: Vec<usize>,
    pub reloads: Vec<String>,
}

impl SlotController for RecordingSlot {
    fn reset_to_root(&mut self) {
        self.resets += 1;
        self.depth = 0;
    }

    fn current_navigation_depth(&self) -> usize {
        self.depth
    }

    fn restore_to_depth(&mut self, depth: usize) {
        self.restores.push(depth);
        self.depth = depth;
    }

    fn reload_for_source(&mut self, source: &ContentSource) {
        self.reloads.push(source.id.clone());
    }
}

pub fn recording_slots() -> [RecordingSlot; SLOT_COUNT] {
    std::array::from_fn(|_| RecordingSlot::default())
}

pub fn main_blog() -> ContentSource {
    ContentSource::new("main", "Main Blog")
}

pub fn travel_blog() -> ContentSource {
    ContentSource::new("travel", "Travel Notes")
}

/// Creates a container on the main blog with recording tabs.
pub fn recording_container(store: Box<dyn StateStore>) -> BlogContainer<RecordingSlot> {
    BlogContainer::new(recording_slots(), main_blog(), store)
}

/// An in-memory store that counts reads. Handles from `shared()` see the
/// same entries and bump the same counter.
pub struct CountingStore {
    inner: Rc<RefCell<MemoryStore>>,
    reads: Rc<Cell<usize>>,
}

impl CountingStore {
    pub fn new() -> (Self, Rc<Cell<usize>>) {
        let reads = Rc::new(Cell::new(0));
        let store = Self {
            inner: Rc::new(RefCell::new(MemoryStore::new())),
            reads: reads.clone(),
        };
        (store, reads)
    }

    pub fn shared(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            reads: self.reads.clone(),
        }
    }
}

impl StateStore for CountingStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.reads.set(self.reads.get() + 1);
        self.inner.borrow().read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().remove(key)
    }
}

/// Every operation fails, like a read-only or full disk.
pub struct FailingStore;

impl StateStore for FailingStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Read {
            key: key.to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read denied"),
        })
    }

    fn write(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Write {
            key: key.to_string(),
            source: io::Error::new(io::ErrorKind::StorageFull, "disk full"),
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        Err(StoreError::Write {
            key: key.to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "remove denied"),
        })
    }
}
