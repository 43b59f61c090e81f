//! Router Configuration
//!
//! Assembles the full Axum router:
//!
//! 1. Public routes: registration, login, the WebSocket endpoint
//! 2. Authenticated API routes (see [`api_routes`](super::api_routes))
//! 3. Uploaded media served under `/uploads`
//! 4. Fallback 404 handler
//!
//! Cross-cutting layers: request tracing, permissive CORS, and a raised
//! body limit so a five-attachment multipart post fits.

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::auth::{login, register};
use crate::backend::realtime::ws_handler;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Body limit: five media files at 10 MB plus form overhead
const MAX_BODY_BYTES: usize = 60 * 1024 * 1024;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let media_root = app_state.media.root().to_path_buf();

    let router = Router::new()
        // Public endpoints
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/ws", get(ws_handler))
        // Everything behind the auth middleware
        .merge(configure_api_routes(&app_state))
        // Uploaded media
        .nest_service("/uploads", ServeDir::new(media_root))
        // 404 for everything else
        .fallback(|| async { "404 Not Found" })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    router.with_state(app_state)
}
