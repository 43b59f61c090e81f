//! Follow Toggle Handler
//!
//! POST /api/users/{user_id}/follow
//!
//! Toggle semantics: an existing edge is removed, a missing one is created.
//! A new follow sends the target a notification; unfollowing is silent.
//! Self-follows are rejected here, not at the storage layer.

use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::follows::db;
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::notify;
use crate::backend::server::state::AppState;
use crate::backend::users;

/// Toggle following a user
///
/// # Errors
///
/// * `400 Bad Request` - attempting to follow yourself
/// * `404 Not Found` - target user does not exist
pub async fn toggle_follow(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    if user_id == user.id {
        return Err(BackendError::validation("You cannot follow yourself"));
    }

    let target = users::db::find_by_id(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    let now_following = db::toggle(&state.db_pool, user.id, user_id).await?;

    if now_following {
        notify(
            &state,
            target.id,
            "follow",
            "You have a new follower",
            serde_json::json!({ "follower_id": user.id }),
        )
        .await?;

        Ok(Json(serde_json::json!({
            "message": "Now following",
            "following": true,
        })))
    } else {
        Ok(Json(serde_json::json!({
            "message": "No longer following",
            "following": false,
        })))
    }
}
