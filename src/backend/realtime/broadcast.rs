//! Real-time Event Broadcasting
//!
//! Feed-visible events are fanned out with `tokio::sync::broadcast`: a
//! multi-producer, multi-consumer channel where every subscriber receives a
//! copy of each event. Handlers send into the channel; each live socket
//! holds a receiver.

use crate::shared::RealtimeEvent;
use tokio::sync::broadcast;

/// Broadcast sender for feed-visible real-time events
///
/// Cloneable and shareable; any handler holding it can publish events to
/// all connected sockets.
pub type RealtimeEventBroadcast = broadcast::Sender<RealtimeEvent>;

/// Broadcast an event to all subscribers
///
/// # Returns
///
/// Number of active subscribers that received the event (0 if none)
pub fn broadcast_event(broadcast_tx: &RealtimeEventBroadcast, event: RealtimeEvent) -> usize {
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!("[Realtime] Event broadcast to {} subscribers", subscriber_count);
            subscriber_count
        }
        Err(_) => {
            // No subscribers; nothing to deliver.
            tracing::debug!("[Realtime] No subscribers to receive event");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_broadcast_event_with_subscriber() {
        let (tx, mut rx) = tokio::sync::broadcast::channel::<RealtimeEvent>(100);

        let event = RealtimeEvent::post_deleted(Uuid::new_v4());
        let count = broadcast_event(&tx, event.clone());

        assert_eq!(count, 1);
        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_broadcast_event_no_subscribers() {
        let (tx, _) = tokio::sync::broadcast::channel::<RealtimeEvent>(100);
        drop(tx.subscribe());

        let event = RealtimeEvent::post_deleted(Uuid::new_v4());
        assert_eq!(broadcast_event(&tx, event), 0);
    }

    #[tokio::test]
    async fn test_broadcast_multiple_subscribers() {
        let (tx, _) = tokio::sync::broadcast::channel::<RealtimeEvent>(100);

        let mut rx1 = tx.subscribe();
        let mut rx2 = tx.subscribe();
        let mut rx3 = tx.subscribe();

        let event = RealtimeEvent::post_deleted(Uuid::new_v4());
        let count = broadcast_event(&tx, event.clone());
        assert_eq!(count, 3);

        assert_eq!(rx1.recv().await.unwrap(), event);
        assert_eq!(rx2.recv().await.unwrap(), event);
        assert_eq!(rx3.recv().await.unwrap(), event);
    }
}
