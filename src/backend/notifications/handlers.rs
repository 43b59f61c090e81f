//! Notification Handlers
//!
//! GET /api/notifications and POST /api/notifications/read.

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::db::{self, Notification};

/// Notifications returned per request
const NOTIFICATION_PAGE_SIZE: i64 = 50;

/// The caller's notifications, newest first
pub async fn list_notifications(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Notification>>, BackendError> {
    let notifications =
        db::user_notifications(&pool, user.id, NOTIFICATION_PAGE_SIZE).await?;
    Ok(Json(notifications))
}

/// Bulk-mark all of the caller's notifications as read
pub async fn mark_notifications_read(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<serde_json::Value>, BackendError> {
    db::mark_all_read(&pool, user.id).await?;

    Ok(Json(serde_json::json!({
        "message": "Notifications marked as read",
    })))
}
