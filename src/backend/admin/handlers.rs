//! Admin Handlers
//!
//! The `/api/admin/*` family. Every handler takes the [`AdminUser`]
//! extractor, so a caller without the admin role is rejected with 403
//! before any work happens.
//!
//! Banning a connected user pushes a final `banned` event to their live
//! connection; the socket loop delivers it and severs the connection. The
//! ban flag itself makes every later REST call fail in the auth middleware.

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::AdminUser;
use crate::backend::posts;
use crate::backend::realtime::broadcast::broadcast_event;
use crate::backend::server::state::AppState;
use crate::backend::users::db::{self, UserSummary};
use crate::shared::RealtimeEvent;

/// GET /api/admin/stats response
#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub banned_users: i64,
    pub active_users: i64,
}

/// Optional `?search=` filter on admin listings
#[derive(Debug, serde::Deserialize)]
pub struct AdminSearchQuery {
    #[serde(default)]
    pub search: String,
}

/// User counts for the admin dashboard
pub async fn stats(
    State(pool): State<PgPool>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<AdminStats>, BackendError> {
    let total_users = db::count_users(&pool).await?;
    let banned_users = db::count_banned(&pool).await?;

    Ok(Json(AdminStats {
        total_users,
        banned_users,
        active_users: total_users - banned_users,
    }))
}

/// All users, optionally filtered by a search string
pub async fn list_users(
    State(pool): State<PgPool>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<AdminSearchQuery>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let users = if query.search.is_empty() {
        db::all_users(&pool).await?
    } else {
        db::search(&pool, &query.search).await?
    };

    Ok(Json(users))
}

/// Banned users, optionally filtered by a search string
pub async fn list_banned(
    State(pool): State<PgPool>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<AdminSearchQuery>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let users = if query.search.is_empty() {
        db::banned_users(&pool).await?
    } else {
        db::search_banned(&pool, &query.search).await?
    };

    Ok(Json(users))
}

/// Ban a user
///
/// # Errors
///
/// * `403 Forbidden` - the target holds the admin role
/// * `404 Not Found` - no such user
pub async fn ban_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let target = db::find_by_id(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    if target.is_admin() {
        return Err(BackendError::forbidden("Admins cannot be banned"));
    }

    let banned = db::ban_user(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    // Final warning over the live channel; the socket closes after delivery.
    state.connections.send_to(
        user_id,
        RealtimeEvent::banned("Your account has been banned"),
    );

    tracing::info!("User {} banned by {}", user_id, admin.id);

    Ok(Json(serde_json::json!({
        "message": "User banned",
        "user": UserResponse::from(banned),
    })))
}

/// Lift a ban
pub async fn unban_user(
    State(pool): State<PgPool>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let unbanned = db::unban_user(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("User {} unbanned by {}", user_id, admin.id);

    Ok(Json(serde_json::json!({
        "message": "User unbanned",
        "user": UserResponse::from(unbanned),
    })))
}

/// Remove a post and tell every connected client
pub async fn delete_post(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let removed = posts::db::delete_post(&state.db_pool, post_id).await?;
    if !removed {
        return Err(BackendError::not_found("Post not found"));
    }

    broadcast_event(
        &state.realtime_broadcast,
        RealtimeEvent::post_deleted(post_id),
    );

    tracing::info!("Post {} deleted by {}", post_id, admin.id);

    Ok(Json(serde_json::json!({ "message": "Post deleted" })))
}

/// Users with a pending verification request
pub async fn verification_requests(
    State(pool): State<PgPool>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let users = db::verification_requests(&pool).await?;
    Ok(Json(users))
}

/// Users holding the verified badge
pub async fn verified_users(
    State(pool): State<PgPool>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let users = db::verified_users(&pool).await?;
    Ok(Json(users))
}

/// Grant a pending verification request
pub async fn approve_verification(
    State(pool): State<PgPool>,
    AdminUser(_admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let user = db::approve_verification(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({
        "message": "Verification approved",
        "user": UserResponse::from(user),
    })))
}

/// Decline a pending verification request
pub async fn reject_verification(
    State(pool): State<PgPool>,
    AdminUser(_admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let user = db::reject_verification(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({
        "message": "Verification request rejected",
        "user": UserResponse::from(user),
    })))
}

/// Remove the verified badge from a user
///
/// # Errors
///
/// * `403 Forbidden` - the target holds the admin role
pub async fn revoke_verification(
    State(pool): State<PgPool>,
    AdminUser(_admin): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let target = db::find_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    if target.is_admin() {
        return Err(BackendError::forbidden(
            "Verification cannot be revoked from admins",
        ));
    }

    let user = db::revoke_verification(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({
        "message": "Verification revoked",
        "user": UserResponse::from(user),
    })))
}
