//! Theme change bus for in-process observers.
//!
//! Uses tokio::sync::broadcast for pub/sub. Only the sync primitives are
//! used, so the bus works in the browser without a tokio runtime.
//! The DOM `theme-changed` event is dispatched separately by the document
//! adapter; this bus serves Rust-side observers such as the UI context.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::theme::ResolvedTheme;

/// Payload of every `theme-changed` notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeChanged {
    pub theme: ResolvedTheme,
}

/// Bus handle for publishing and subscribing
#[derive(Clone)]
pub struct ThemeBus {
    sender: broadcast::Sender<ThemeChanged>,
}

impl ThemeBus {
    /// Create a new bus with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: ThemeChanged) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChanged> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ThemeBus {
    /// Theme changes are rare; 16 slots covers a burst of clicks.
    fn default() -> Self {
        Self::new(16)
    }
}

pub type SharedBus = Arc<ThemeBus>;

pub fn create_bus() -> SharedBus {
    Arc::new(ThemeBus::default())
}
