//! Ripple - Main Library
//!
//! Ripple is a small social-network backend built with Rust: registration,
//! posts with media, comments, reactions, follows, notifications, admin
//! moderation, and live fan-out of events over a WebSocket channel.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types serialized over the wire
//!   - Social domain types (reactions, comments, media)
//!   - Real-time event types
//!   - Error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with REST handlers
//!   - PostgreSQL persistence via sqlx
//!   - Authentication, JWT tokens, user management
//!   - Connection registry and event broadcasting
//!
//! # Usage
//!
//! ```rust,no_run
//! use ripple::backend::server::init::create_app;
//!
//! # async fn example() -> Result<(), sqlx::Error> {
//! let app = create_app().await?;
//! // Use app with Axum server
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All server state is thread-safe: the database pool is shared by value,
//! broadcast fan-out uses `tokio::sync::broadcast`, and the live-connection
//! registry is a mutex-guarded map owned by the application state.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
