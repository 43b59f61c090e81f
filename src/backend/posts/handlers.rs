//! Post Handlers
//!
//! Post creation (multipart with media), the global feed, per-user post
//! listings, reaction toggles, and comment appends. Mutating endpoints
//! publish the matching real-time event after the write lands.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::follows;
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::notify;
use crate::backend::posts::db::{self, PostWithAuthor};
use crate::backend::realtime::broadcast::broadcast_event;
use crate::backend::server::state::AppState;
use crate::shared::{Comment, MediaItem, ReactionKind, RealtimeEvent};

/// Maximum media attachments per post
const MAX_MEDIA_PER_POST: usize = 5;

/// Page/limit query for feed-style listings
#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Resolve to a (limit, offset) pair with the surface's defaults
    pub fn to_limit_offset(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).clamp(1, 100);
        (limit, (page - 1) * limit)
    }
}

/// POST /api/posts/{post_id}/reactions request body
#[derive(Debug, Deserialize)]
pub struct ReactionRequest {
    pub reaction: String,
}

/// POST /api/posts/{post_id}/comments request body
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// Create a post from a multipart form: a `content` text field plus up to
/// five `media` files.
///
/// Broadcasts `new_post` to every live socket and notifies each follower.
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<PostWithAuthor>), BackendError> {
    let mut content = String::new();
    let mut media: Vec<MediaItem> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BackendError::validation(format!("Invalid upload: {}", e)))?
    {
        match field.name() {
            Some("content") => {
                content = field
                    .text()
                    .await
                    .map_err(|e| BackendError::validation(format!("Invalid upload: {}", e)))?;
            }
            Some("media") => {
                if media.len() >= MAX_MEDIA_PER_POST {
                    return Err(BackendError::validation(
                        "A post can carry at most 5 media files",
                    ));
                }

                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
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
                media.push(item);
            }
            _ => {}
        }
    }

    let content = content.trim();
    if content.is_empty() {
        return Err(BackendError::validation("Post content is required"));
    }

    let post = db::create_post(&state.db_pool, user.id, content, &media).await?;

    let post_with_author = PostWithAuthor {
        id: post.id,
        author_id: post.author_id,
        content: post.content,
        media: post.media,
        reactions: post.reactions,
        comments: post.comments,
        version: post.version,
        created_at: post.created_at,
        author_name: user.name.clone(),
        author_username: user.username.clone(),
        author_avatar: user.avatar.clone(),
        author_is_verified: user.is_verified,
    };

    // Tell followers, then everyone watching the feed.
    let follower_ids = follows::db::followers(&state.db_pool, user.id).await?;
    for follower_id in follower_ids {
        notify(
            &state,
            follower_id,
            "new_post",
            &format!("{} published a new post", user.name),
            serde_json::json!({ "post_id": post_with_author.id }),
        )
        .await?;
    }

    let payload = serde_json::to_value(&post_with_author)?;
    broadcast_event(&state.realtime_broadcast, RealtimeEvent::new_post(payload));

    Ok((StatusCode::CREATED, Json(post_with_author)))
}

/// The global feed, newest first
pub async fn get_feed(
    State(pool): State<PgPool>,
    AuthUser(_user): AuthUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<PostWithAuthor>>, BackendError> {
    let (limit, offset) = pagination.to_limit_offset();
    let posts = db::feed(&pool, limit, offset).await?;
    Ok(Json(posts))
}

/// One user's posts, newest first
pub async fn get_user_posts(
    State(pool): State<PgPool>,
    AuthUser(_viewer): AuthUser,
    Path(user_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<PostWithAuthor>>, BackendError> {
    let (limit, offset) = pagination.to_limit_offset();
    let posts = db::user_posts(&pool, user_id, limit, offset).await?;
    Ok(Json(posts))
}

/// Toggle the caller's reaction on a post
///
/// Returns the full updated reaction map, broadcasts `post_reaction`, and
/// notifies the post author when someone else reacts.
pub async fn react_to_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<ReactionRequest>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let kind = ReactionKind::from_str(&request.reaction)
        .ok_or_else(|| BackendError::validation("Invalid reaction type"))?;

    let post = db::find_by_id(&state.db_pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))?;

    let reactions = db::toggle_reaction(&state.db_pool, post_id, user.id, kind)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))?;

    if post.author_id != user.id {
        notify(
            &state,
            post.author_id,
            "reaction",
            "Someone reacted to your post",
            serde_json::json!({ "post_id": post_id }),
        )
        .await?;
    }

    broadcast_event(
        &state.realtime_broadcast,
        RealtimeEvent::post_reaction(post_id, &reactions),
    );

    Ok(Json(serde_json::json!({
        "message": "Reaction updated",
        "reactions": reactions,
    })))
}

/// Append a comment to a post
///
/// The comment snapshots the author's name, username and avatar at write
/// time. Broadcasts `new_comment` and notifies the post author when someone
/// else comments.
pub async fn comment_on_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), BackendError> {
    if request.text.trim().is_empty() {
        return Err(BackendError::validation("Comment text is required"));
    }

    let post = db::find_by_id(&state.db_pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))?;

    let comment = Comment::new(
        user.id,
        &user.name,
        &user.username,
        user.avatar.clone(),
        &request.text,
    );

    db::append_comment(&state.db_pool, post_id, &comment)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))?;

    if post.author_id != user.id {
        notify(
            &state,
            post.author_id,
            "comment",
            &format!("{} commented on your post", user.name),
            serde_json::json!({ "post_id": post_id }),
        )
        .await?;
    }

    broadcast_event(
        &state.realtime_broadcast,
        RealtimeEvent::new_comment(post_id, &comment),
    );

    Ok((StatusCode::CREATED, Json(comment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination {
            page: None,
            limit: None,
        };
        assert_eq!(pagination.to_limit_offset(), (10, 0));
    }

    #[test]
    fn test_pagination_offset() {
        let pagination = Pagination {
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(pagination.to_limit_offset(), (20, 40));
    }

    #[test]
    fn test_pagination_clamps_bad_input() {
        let pagination = Pagination {
            page: Some(0),
            limit: Some(100_000),
        };
        let (limit, offset) = pagination.to_limit_offset();
        assert_eq!(limit, 100);
        assert_eq!(offset, 0);
    }
}
