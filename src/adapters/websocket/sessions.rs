//! Bookkeeping for relayed client sessions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use uuid::Uuid;

/// Unique identifier for a WebSocket client connection.
///
/// Generated server-side when a client connects; only used in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counts the sessions currently being relayed.
#[derive(Debug, Default)]
pub struct SessionTracker {
    active: AtomicUsize,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session; it stays counted until the guard is dropped.
    pub fn open(self: &Arc<Self>) -> SessionGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        SessionGuard {
            tracker: Arc::clone(self),
        }
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Keeps one session counted for as long as it lives.
#[derive(Debug)]
pub struct SessionGuard {
    tracker: Arc<SessionTracker>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.tracker.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_counts_session_until_dropped() {
        let tracker = Arc::new(SessionTracker::new());
        assert_eq!(tracker.active(), 0);

        let first = tracker.open();
        let second = tracker.open();
        assert_eq!(tracker.active(), 2);

        drop(first);
        assert_eq!(tracker.active(), 1);
        drop(second);
        assert_eq!(tracker.active(), 0);
    }

    #[test]
    fn client_id_display_works() {
        let display = ClientId::new().to_string();
        // Should be a valid UUID format
        assert_eq!(display.len(), 36);
    }
}
