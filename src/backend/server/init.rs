//! Server Initialization
//!
//! Builds the application: database pool (required), broadcast channel,
//! connection registry, media store, and the router.
//!
//! The broadcast channel and registry are created here and owned by
//! [`AppState`]; their lifecycle is the process lifecycle.

use axum::Router;
use tokio::sync::broadcast;

use crate::backend::media::MediaStore;
use crate::backend::realtime::registry::ConnectionRegistry;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, media_root};
use crate::backend::server::state::AppState;
use crate::shared::RealtimeEvent;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when `DATABASE_URL` is unset or the database is unreachable; the
/// server cannot run without its datastore.
pub async fn create_app() -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing ripple backend server");

    let db_pool = load_database().await?;

    // Capacity of 1000 leaves plenty of room before slow sockets lag.
    let (realtime_broadcast, _) = broadcast::channel::<RealtimeEvent>(1000);
    let connections = ConnectionRegistry::new();
    let media = MediaStore::new(media_root());

    let app_state = AppState {
        db_pool,
        realtime_broadcast,
        connections,
        media,
    };

    tracing::info!("State and broadcast channels initialized");

    Ok(create_router(app_state))
}
