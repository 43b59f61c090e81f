//! Backend Module
//!
//! This module contains all server-side code for the ripple application:
//! an Axum HTTP server exposing the REST surface, PostgreSQL persistence
//! via sqlx, JWT authentication, and real-time fan-out over WebSockets.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - JWT sessions and register/login/me handlers
//! - **`middleware`** - Bearer-token middleware and capability extractors
//! - **`users`** - User store, profiles, search, verification
//! - **`posts`** - Post store, feed, reactions, comments
//! - **`follows`** - Follow edges with toggle semantics
//! - **`notifications`** - Per-user notifications and dispatch
//! - **`admin`** - Moderation endpoints
//! - **`realtime`** - Broadcast channel, connection registry, WebSocket
//! - **`media`** - Uploaded file storage
//! - **`error`** - Backend error types
//!
//! # State Management
//!
//! Shared state (`AppState`) carries the database pool, the broadcast
//! channel for feed-visible events, the live-connection registry, and the
//! media store. All of it is created at startup and cloned into handlers;
//! nothing lives in module-level globals.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and sessions
pub mod auth;

/// Request middleware
pub mod middleware;

/// User store and profile handlers
pub mod users;

/// Post store and handlers
pub mod posts;

/// Follow store and handler
pub mod follows;

/// Notification store, dispatch and handlers
pub mod notifications;

/// Admin moderation endpoints
pub mod admin;

/// Real-time fan-out
pub mod realtime;

/// Uploaded media storage
pub mod media;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use realtime::{broadcast_event, ConnectionRegistry, RealtimeEventBroadcast};
pub use server::{create_app, AppState};
