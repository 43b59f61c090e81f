//! User Profile Handlers
//!
//! Profile updates, avatar upload, user search, public profiles,
//! verification requests, and account deletion.

use axum::{
    extract::{Multipart, Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::error::BackendError;
use crate::backend::follows;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::users::db::{self, UserSummary};
use crate::shared::MediaKind;

/// PUT /api/profile request body; absent fields keep their current value
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
}

/// Search query string
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Public profile served by GET /api/users/{user_id}
#[derive(Debug, Serialize)]
pub struct PublicProfile {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub is_verified: bool,
    pub followers_count: i64,
    pub following_count: i64,
    pub is_following: bool,
}

/// Update the authenticated user's profile
///
/// # Errors
///
/// * `400 Bad Request` - short username or one already taken by another user
pub async fn update_profile(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<serde_json::Value>, BackendError> {
    if let Some(username) = &request.username {
        if username.len() < 4 {
            return Err(BackendError::validation(
                "Username must be at least 4 characters",
            ));
        }

        if let Some(existing) = db::find_by_username(&pool, username).await? {
            if existing.id != user.id {
                return Err(BackendError::validation("This username is already taken"));
            }
        }
    }

    let updated = db::update_profile(
        &pool,
        user.id,
        request.name.as_deref(),
        request.username.as_deref(),
        request.bio.as_deref(),
    )
    .await?
    .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({
        "message": "Profile updated",
        "user": UserResponse::from(updated),
    })))
}

/// Upload a new avatar (multipart, single image file)
pub async fn upload_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, BackendError> {
    let mut stored = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BackendError::validation(format!("Invalid upload: {}", e)))?
    {
        if field.name() != Some("avatar") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        // Reject non-images before anything touches the disk.
        let kind = content_type.as_deref().and_then(MediaKind::from_content_type);
        if kind != Some(MediaKind::Image) {
            return Err(BackendError::validation("Avatar must be an image"));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| BackendError::validation(format!("Invalid upload: {}", e)))?;

        let item = state
            .media
            .store(
                user.id,
                file_name.as_deref(),
                content_type.as_deref(),
                &data,
            )
            .await?;

        stored = Some(item);
        break;
    }

    let item = stored.ok_or_else(|| BackendError::validation("No file uploaded"))?;

    let updated = db::update_avatar(&state.db_pool, user.id, &item.url)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({
        "message": "Avatar updated",
        "avatar": updated.avatar,
    })))
}

/// Search users by username or display name
///
/// An empty query returns an empty list rather than every user.
pub async fn search_users(
    State(pool): State<PgPool>,
    AuthUser(_user): AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    if query.q.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let results = db::search(&pool, &query.q).await?;
    Ok(Json(results))
}

/// Get a user's public profile with follow counts
pub async fn get_user_profile(
    State(pool): State<PgPool>,
    AuthUser(viewer): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<PublicProfile>, BackendError> {
    let user = db::find_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    let followers_count = follows::db::follower_count(&pool, user_id).await?;
    let following_count = follows::db::following_count(&pool, user_id).await?;

    let is_following = if viewer.id != user_id {
        follows::db::is_following(&pool, viewer.id, user_id).await?
    } else {
        false
    };

    Ok(Json(PublicProfile {
        id: user.id,
        name: user.name,
        username: user.username,
        avatar: user.avatar,
        bio: user.bio,
        is_verified: user.is_verified,
        followers_count,
        following_count,
        is_following,
    }))
}

/// Request the verified badge
///
/// # Errors
///
/// * `400 Bad Request` - already verified, or a request is already pending
pub async fn request_verification(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<serde_json::Value>, BackendError> {
    if user.is_verified {
        return Err(BackendError::validation("You are already verified"));
    }

    if user.verification_requested {
        return Err(BackendError::validation(
            "You have already requested verification",
        ));
    }

    let updated = db::request_verification(&pool, user.id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({
        "message": "Verification request submitted",
        "verification_requested": updated.verification_requested,
    })))
}

/// Delete the authenticated user's account
///
/// Posts, follow edges and notifications cascade in the database; uploaded
/// media is removed from the store.
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<serde_json::Value>, BackendError> {
    db::delete_user(&state.db_pool, user.id).await?;

    if let Err(e) = state.media.remove_user_media(user.id).await {
        // The account row is already gone; orphaned files are not fatal.
        tracing::warn!("Failed to remove media for {}: {:?}", user.id, e);
    }

    tracing::info!("Account deleted: {} ({})", user.username, user.id);

    Ok(Json(serde_json::json!({ "message": "Account deleted" })))
}
