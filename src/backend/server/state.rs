//! Application State Management
//!
//! This module defines the application state structure and implements
//! `FromRef` so Axum handlers can extract the specific piece they need.
//!
//! # Thread Safety
//!
//! All fields are designed for concurrent access:
//! - `PgPool` is internally reference-counted and cloneable
//! - `broadcast::Sender` is thread-safe and can be cloned
//! - `ConnectionRegistry` wraps its map in `Arc<Mutex<>>`
//! - `MediaStore` is an immutable path root
//!
//! # State Extraction
//!
//! The `FromRef` implementations let handlers take `State<PgPool>` or
//! `State<RealtimeEventBroadcast>` instead of the whole `AppState`,
//! following Axum's recommended substate pattern.

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::media::MediaStore;
use crate::backend::realtime::broadcast::RealtimeEventBroadcast;
use crate::backend::realtime::registry::ConnectionRegistry;

/// Central state container for the Axum application
///
/// Created once at startup by [`create_app`](super::init::create_app) and
/// cloned into every handler. The connection registry and broadcast channel
/// live here, with their lifecycle tied to the process rather than to any
/// module-level singleton.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    /// Broadcast channel for feed-visible real-time events
    ///
    /// Every live socket subscribes to this on connect. Mutating handlers
    /// publish `new_post`, `post_reaction`, `new_comment` and
    /// `post_deleted` events here.
    pub realtime_broadcast: RealtimeEventBroadcast,

    /// Registry mapping authenticated users to their live connection
    ///
    /// Used for targeted delivery: private notifications and the final
    /// `banned` warning.
    pub connections: ConnectionRegistry,

    /// Store for uploaded media files
    pub media: MediaStore,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for RealtimeEventBroadcast {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.realtime_broadcast.clone()
    }
}

impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.connections.clone()
    }
}

impl FromRef<AppState> for MediaStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.media.clone()
    }
}
