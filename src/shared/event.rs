//! Real-time Event System
//!
//! This module defines the events pushed over the live WebSocket channel.
//! Feed-visible events (`new_post`, `post_reaction`, `new_comment`,
//! `post_deleted`) are broadcast to every connected socket; `notification`
//! and `banned` are delivered only to the affected user's registered
//! connection.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of real-time event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A post was published
    NewPost,
    /// A post's reaction map changed
    PostReaction,
    /// A comment was appended to a post
    NewComment,
    /// A post was removed by moderation
    PostDeleted,
    /// A private notification for one user
    Notification,
    /// The recipient's account was banned; final event before disconnect
    Banned,
}

impl EventType {
    /// Wire name of this event
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::NewPost => "new_post",
            EventType::PostReaction => "post_reaction",
            EventType::NewComment => "new_comment",
            EventType::PostDeleted => "post_deleted",
            EventType::Notification => "notification",
            EventType::Banned => "banned",
        }
    }

    /// Whether this event goes to every connected socket (as opposed to
    /// one user's registered connection)
    pub fn is_broadcast(&self) -> bool {
        matches!(
            self,
            EventType::NewPost
                | EventType::PostReaction
                | EventType::NewComment
                | EventType::PostDeleted
        )
    }
}

/// Real-time event pushed to live connections
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealtimeEvent {
    /// Type of event
    pub event_type: EventType,
    /// Event payload (JSON-serializable data)
    pub payload: serde_json::Value,
    /// Timestamp when the event occurred (RFC3339)
    pub timestamp: String,
}

impl RealtimeEvent {
    /// Create a new real-time event
    pub fn new(event_type: EventType, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            payload,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// A post was published; payload is the post with author fields
    pub fn new_post(post: serde_json::Value) -> Self {
        Self::new(EventType::NewPost, post)
    }

    /// A post's reaction map changed
    pub fn post_reaction(post_id: Uuid, reactions: &crate::shared::ReactionMap) -> Self {
        Self::new(
            EventType::PostReaction,
            serde_json::json!({
                "post_id": post_id,
                "reactions": reactions,
            }),
        )
    }

    /// A comment was appended to a post
    pub fn new_comment(post_id: Uuid, comment: &crate::shared::Comment) -> Self {
        Self::new(
            EventType::NewComment,
            serde_json::json!({
                "post_id": post_id,
                "comment": comment,
            }),
        )
    }

    /// A post was removed by moderation
    pub fn post_deleted(post_id: Uuid) -> Self {
        Self::new(
            EventType::PostDeleted,
            serde_json::json!({ "post_id": post_id }),
        )
    }

    /// A private notification for one user
    pub fn notification(payload: serde_json::Value) -> Self {
        Self::new(EventType::Notification, payload)
    }

    /// The recipient's account was banned
    pub fn banned(message: impl Into<String>) -> Self {
        Self::new(
            EventType::Banned,
            serde_json::json!({ "message": message.into() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{ReactionKind, ReactionMap};

    #[test]
    fn test_event_new() {
        let event = RealtimeEvent::new(EventType::NewPost, serde_json::json!({"content": "hi"}));
        assert_eq!(event.event_type, EventType::NewPost);
        assert!(!event.timestamp.is_empty());
    }

    #[test]
    fn test_post_reaction_payload() {
        let post_id = Uuid::new_v4();
        let mut reactions = ReactionMap::new();
        let u = Uuid::new_v4();
        reactions.toggle(u, ReactionKind::Heart);

        let event = RealtimeEvent::post_reaction(post_id, &reactions);
        assert_eq!(event.event_type, EventType::PostReaction);
        assert_eq!(event.payload["post_id"], serde_json::json!(post_id));
        assert_eq!(
            event.payload["reactions"]["heart"],
            serde_json::json!([u])
        );
    }

    #[test]
    fn test_banned_payload() {
        let event = RealtimeEvent::banned("Your account has been banned");
        assert_eq!(event.event_type, EventType::Banned);
        assert_eq!(event.payload["message"], "Your account has been banned");
    }

    #[test]
    fn test_broadcast_classification() {
        assert!(EventType::NewPost.is_broadcast());
        assert!(EventType::PostReaction.is_broadcast());
        assert!(EventType::PostDeleted.is_broadcast());
        assert!(!EventType::Notification.is_broadcast());
        assert!(!EventType::Banned.is_broadcast());
    }

    #[test]
    fn test_event_type_wire_names() {
        let json = serde_json::to_string(&EventType::NewPost).unwrap();
        assert_eq!(json, "\"new_post\"");
        for event_type in [
            EventType::NewPost,
            EventType::PostReaction,
            EventType::NewComment,
            EventType::PostDeleted,
            EventType::Notification,
            EventType::Banned,
        ] {
            let json = serde_json::to_string(&event_type).unwrap();
            assert_eq!(json.trim_matches('"'), event_type.as_str());
        }
    }

    #[test]
    fn test_event_serialization_round_trip() {
        let event = RealtimeEvent::post_deleted(Uuid::new_v4());
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: RealtimeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
