//! Transient notices: the error banners and short hints shown above the
//! prompt line. They expire on their own; nothing persists them.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity level for in-app notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A transient banner.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub body: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    /// Creates an info notification with a 3-second TTL.
    pub fn info(body: impl Into<String>) -> Self {
        Self::with_ttl(NotificationLevel::Info, body, Duration::from_secs(3))
    }

    /// Creates a warning notification with a 3-second TTL.
    pub fn warning(body: impl Into<String>) -> Self {
        Self::with_ttl(NotificationLevel::Warning, body, Duration::from_secs(3))
    }

    /// Creates an error notification with a 10-second TTL.
    pub fn error(body: impl Into<String>) -> Self {
        Self::with_ttl(NotificationLevel::Error, body, Duration::from_secs(10))
    }

    pub fn with_ttl(level: NotificationLevel, body: impl Into<String>, ttl: Duration) -> Self {
        Self {
            level,
            body: body.into(),
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Returns `true` if this notification has exceeded its TTL.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// A bounded queue of notifications that auto-evicts expired entries.
#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a notification, evicting expired entries first.
    /// If still at capacity after eviction, the oldest entry is removed.
    pub fn push(&mut self, notification: Notification) {
        self.evict_expired();
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    pub fn extend(&mut self, notifications: impl IntoIterator<Item = Notification>) {
        for n in notifications {
            self.push(n);
        }
    }

    /// Removes and returns everything still visible, oldest first.
    pub fn drain_visible(&mut self) -> Vec<Notification> {
        self.evict_expired();
        self.items.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn evict_expired(&mut self) {
        self.items.retain(|n| !n.is_expired());
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(8)
    }
}
