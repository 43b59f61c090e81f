//! Real-time Fan-out
//!
//! Live delivery of events to connected clients over a WebSocket channel.
//!
//! Two delivery paths exist:
//!
//! - **Broadcast**: feed-visible events (`new_post`, `post_reaction`,
//!   `new_comment`, `post_deleted`) go over a `tokio::sync::broadcast`
//!   channel that every socket subscribes to on connect.
//! - **Targeted**: `notification` and `banned` go through the
//!   [`ConnectionRegistry`], which maps an authenticated user to their one
//!   registered connection (last-authenticated wins).
//!
//! A raw connection becomes addressable only after the client completes the
//! authenticate handshake; see [`socket`].

/// Broadcast channel for feed-visible events
pub mod broadcast;

/// Registry mapping users to live connections
pub mod registry;

/// WebSocket endpoint and handshake
pub mod socket;

pub use broadcast::{broadcast_event, RealtimeEventBroadcast};
pub use registry::ConnectionRegistry;
pub use socket::ws_handler;
