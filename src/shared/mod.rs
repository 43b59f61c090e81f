//! Shared Module
//!
//! This module contains types that cross the wire boundary: social domain
//! types embedded in API responses and database documents, real-time event
//! types pushed over the live channel, and shared error types.

/// Social domain types (reactions, comments, media)
pub mod social;

/// Real-time event system
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use event::{EventType, RealtimeEvent};
pub use social::{Comment, MediaItem, MediaKind, ReactionKind, ReactionMap};
