//! Database operations for notifications.
//!
//! Notifications are append-only per-user messages with a read flag. They
//! are bulk-marked read; individual deletion is not part of the surface
//! (rows go away when the user does, via cascade).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// One notification row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    /// Recipient
    pub user_id: Uuid,
    /// Type tag (`follow`, `comment`, `reaction`, `new_post`, ...)
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Opaque payload interpreted by the client
    pub data: Json<serde_json::Value>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Append a notification for a user
pub async fn create_notification(
    pool: &PgPool,
    user_id: Uuid,
    kind: &str,
    message: &str,
    data: &serde_json::Value,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        r#"
        INSERT INTO notifications (user_id, type, message, data)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, type, message, data, read, created_at
        "#,
    )
    .bind(user_id)
    .bind(kind)
    .bind(message)
    .bind(Json(data))
    .fetch_one(pool)
    .await
}

/// A user's notifications, newest first
pub async fn user_notifications(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        r#"
        SELECT id, user_id, type, message, data, read, created_at
        FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Mark all of a user's notifications as read
pub async fn mark_all_read(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}
