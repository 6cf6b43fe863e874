//! # Content Sources
//!
//! A content source is the blog whose posts, pages, comments and stats are on
//! screen. The registry owns the list of known blogs, tracks which one is
//! current, and tells subscribers when that changes.
//!
//! Notifications go out over `std::sync::mpsc` channels. Subscribers drain
//! them on their own thread, so a change never interrupts whatever the
//! subscriber is doing at the time.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSource {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
}

impl ContentSource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A registry needs at least one source to have a current one.
    Empty,
    UnknownSource(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Empty => write!(f, "no content sources configured"),
            RegistryError::UnknownSource(id) => write!(f, "unknown content source: {id}"),
        }
    }
}

impl std::error::Error for RegistryError {}

pub type SubscriptionId = u64;

/// A live subscription to "content source changed" notifications.
pub struct Subscription {
    pub id: SubscriptionId,
    pub receiver: Receiver<ContentSource>,
}

pub struct ContentSourceRegistry {
    sources: Vec<ContentSource>,
    current: usize,
    subscribers: Vec<(SubscriptionId, Sender<ContentSource>)>,
    next_subscription: SubscriptionId,
}

impl ContentSourceRegistry {
    /// The first source becomes current.
    pub fn new(sources: Vec<ContentSource>) -> Result<Self, RegistryError> {
        if sources.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self {
            sources,
            current: 0,
            subscribers: Vec::new(),
            next_subscription: 1,
        })
    }

    pub fn current(&self) -> &ContentSource {
        &self.sources[self.current]
    }

    pub fn sources(&self) -> &[ContentSource] {
        &self.sources
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, tx));
        debug!("Content source subscriber {} registered", id);
        Subscription { id, receiver: rx }
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        before != self.subscribers.len()
    }

    /// Make the source with `id` current.
    ///
    /// Returns `Ok(false)` without notifying when it already is.
    pub fn select(&mut self, id: &str) -> Result<bool, RegistryError> {
        let index = self
            .sources
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RegistryError::UnknownSource(id.to_string()))?;
        if index == self.current {
            return Ok(false);
        }
        self.current = index;
        self.notify();
        Ok(true)
    }

    /// Cycle to the next source, wrapping around. With a single source this
    /// is a no-op and nobody is notified.
    pub fn select_next(&mut self) -> &ContentSource {
        if self.sources.len() > 1 {
            self.current = (self.current + 1) % self.sources.len();
            self.notify();
        }
        self.current()
    }

    fn notify(&mut self) {
        let source = self.sources[self.current].clone();
        info!("Content source changed to '{}' ({})", source.name, source.id);
        self.subscribers.retain(|(id, tx)| {
            let alive = tx.send(source.clone()).is_ok();
            if !alive {
                debug!("Pruning content source subscriber {}: receiver dropped", id);
            }
            alive
        });
    }
}
