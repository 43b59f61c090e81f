//! Live-connection registry.
//!
//! Maps an authenticated user to their one live connection. The registry is
//! created at process start and owned by the application state; it is
//! injected wherever targeted delivery is needed rather than living in a
//! module-level global.
//!
//! Registration semantics: the last-authenticated connection wins. There is
//! no multi-device fan-out; authenticating a second socket for the same
//! user replaces the first entry. Unregistration is guarded by the
//! connection id, so a stale socket closing cannot evict its replacement.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::shared::RealtimeEvent;

/// Sender half of one live connection's targeted-event queue
pub type ConnectionSender = mpsc::UnboundedSender<RealtimeEvent>;

struct RegisteredConnection {
    connection_id: Uuid,
    sender: ConnectionSender,
}

/// Registry mapping user ids to their registered live connection
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<Mutex<HashMap<Uuid, RegisteredConnection>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register `sender` as the live connection for `user_id`.
    ///
    /// Replaces any previously registered connection (last wins).
    pub fn register(&self, user_id: Uuid, connection_id: Uuid, sender: ConnectionSender) {
        let mut connections = self.inner.lock().unwrap();
        if connections
            .insert(
                user_id,
                RegisteredConnection {
                    connection_id,
                    sender,
                },
            )
            .is_some()
        {
            tracing::debug!("Replaced live connection for user {}", user_id);
        }
    }

    /// Remove the registry entry for `user_id`, but only if it still belongs
    /// to `connection_id`. A socket that was superseded by a newer login
    /// must not evict its replacement on close.
    pub fn unregister(&self, user_id: Uuid, connection_id: Uuid) {
        let mut connections = self.inner.lock().unwrap();
        if let Some(registered) = connections.get(&user_id) {
            if registered.connection_id == connection_id {
                connections.remove(&user_id);
            }
        }
    }

    /// Send a targeted event to `user_id`'s registered connection.
    ///
    /// Returns `true` if the user had a registered, still-open connection.
    pub fn send_to(&self, user_id: Uuid, event: RealtimeEvent) -> bool {
        let connections = self.inner.lock().unwrap();
        match connections.get(&user_id) {
            Some(registered) => registered.sender.send(event).is_ok(),
            None => false,
        }
    }

    /// Whether `user_id` currently has a registered connection
    pub fn is_connected(&self, user_id: Uuid) -> bool {
        self.inner.lock().unwrap().contains_key(&user_id)
    }

    /// Number of registered connections
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> RealtimeEvent {
        RealtimeEvent::banned("test")
    }

    #[test]
    fn test_register_and_send() {
        let registry = ConnectionRegistry::new();
        let user = Uuid::new_v4();
        let (tx, mut rx) = mpsc::unbounded_channel();

        registry.register(user, Uuid::new_v4(), tx);
        assert!(registry.is_connected(user));
        assert!(registry.send_to(user, event()));
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_send_to_unknown_user() {
        let registry = ConnectionRegistry::new();
        assert!(!registry.send_to(Uuid::new_v4(), event()));
    }

    #[test]
    fn test_last_authenticated_connection_wins() {
        let registry = ConnectionRegistry::new();
        let user = Uuid::new_v4();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();

        registry.register(user, Uuid::new_v4(), tx1);
        registry.register(user, Uuid::new_v4(), tx2);

        assert_eq!(registry.len(), 1);
        assert!(registry.send_to(user, event()));
        assert!(rx1.try_recv().is_err());
        assert!(rx2.try_recv().is_ok());
    }

    #[test]
    fn test_stale_unregister_keeps_replacement() {
        let registry = ConnectionRegistry::new();
        let user = Uuid::new_v4();
        let old_connection = Uuid::new_v4();
        let new_connection = Uuid::new_v4();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        registry.register(user, old_connection, tx1);
        registry.register(user, new_connection, tx2);

        // The superseded socket closes late; the new entry must survive.
        registry.unregister(user, old_connection);
        assert!(registry.is_connected(user));

        registry.unregister(user, new_connection);
        assert!(!registry.is_connected(user));
    }

    #[test]
    fn test_send_to_closed_connection_reports_failure() {
        let registry = ConnectionRegistry::new();
        let user = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        registry.register(user, Uuid::new_v4(), tx);
        assert!(!registry.send_to(user, event()));
    }
}
