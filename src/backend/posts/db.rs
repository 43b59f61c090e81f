//! Post Model and Database Operations
//!
//! Posts embed their media, reactions and comments as JSONB documents on the
//! row. Reaction and comment writes go through a compare-and-swap cycle
//! against the row's `version` counter: read the document, mutate it in
//! memory, and update `WHERE id = $n AND version = $m`. Zero rows affected
//! means a concurrent writer got there first; reload and retry. This closes
//! the lost-update window a plain read-modify-write on the JSONB blob
//! would have.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::{Comment, MediaItem, ReactionKind, ReactionMap};

/// Post row as stored
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub media: Json<Vec<MediaItem>>,
    pub reactions: Json<ReactionMap>,
    pub comments: Json<Vec<Comment>>,
    #[serde(skip_serializing, default)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

/// Post row joined with its author's public fields, as served in feeds
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub media: Json<Vec<MediaItem>>,
    pub reactions: Json<ReactionMap>,
    pub comments: Json<Vec<Comment>>,
    #[serde(skip_serializing, default)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_username: String,
    pub author_avatar: Option<String>,
    pub author_is_verified: bool,
}

/// Joined column list for feed-style queries
const POST_WITH_AUTHOR_COLUMNS: &str = "p.id, p.author_id, p.content, p.media, p.reactions, \
     p.comments, p.version, p.created_at, \
     u.name AS author_name, u.username AS author_username, \
     u.avatar AS author_avatar, u.is_verified AS author_is_verified";

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    content: &str,
    media: &[MediaItem],
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (author_id, content, media)
        VALUES ($1, $2, $3)
        RETURNING id, author_id, content, media, reactions, comments, version, created_at
        "#,
    )
    .bind(author_id)
    .bind(content)
    .bind(Json(media))
    .fetch_one(pool)
    .await
}

/// The global feed: every post, newest first
pub async fn feed(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, PostWithAuthor>(&format!(
        r#"
        SELECT {POST_WITH_AUTHOR_COLUMNS}
        FROM posts p
        JOIN users u ON p.author_id = u.id
        ORDER BY p.created_at DESC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// One user's posts, newest first
pub async fn user_posts(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, PostWithAuthor>(&format!(
        r#"
        SELECT {POST_WITH_AUTHOR_COLUMNS}
        FROM posts p
        JOIN users u ON p.author_id = u.id
        WHERE p.author_id = $1
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Get a post with author fields by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<PostWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, PostWithAuthor>(&format!(
        r#"
        SELECT {POST_WITH_AUTHOR_COLUMNS}
        FROM posts p
        JOIN users u ON p.author_id = u.id
        WHERE p.id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Toggle `user_id`'s reaction of `kind` on a post.
///
/// Applies [`ReactionMap::toggle`] under compare-and-swap and returns the
/// full updated map, or `None` if the post does not exist. Callers must
/// treat `None` as not-found.
pub async fn toggle_reaction(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
    kind: ReactionKind,
) -> Result<Option<ReactionMap>, sqlx::Error> {
    loop {
        let row = sqlx::query("SELECT reactions, version FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let Json(mut reactions): Json<ReactionMap> = row.try_get("reactions")?;
        let version: i64 = row.try_get("version")?;

        reactions.toggle(user_id, kind);

        let result = sqlx::query(
            "UPDATE posts SET reactions = $1, version = version + 1 \
             WHERE id = $2 AND version = $3",
        )
        .bind(Json(&reactions))
        .bind(post_id)
        .bind(version)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(Some(reactions));
        }

        tracing::debug!("Reaction CAS conflict on post {}, retrying", post_id);
    }
}

/// Append a comment to a post's ordered comment sequence.
///
/// Returns `None` if the post does not exist. The comment is assumed to be
/// validated (non-empty trimmed text) by the caller.
pub async fn append_comment(
    pool: &PgPool,
    post_id: Uuid,
    comment: &Comment,
) -> Result<Option<()>, sqlx::Error> {
    loop {
        let row = sqlx::query("SELECT comments, version FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let Json(mut comments): Json<Vec<Comment>> = row.try_get("comments")?;
        let version: i64 = row.try_get("version")?;

        comments.push(comment.clone());

        let result = sqlx::query(
            "UPDATE posts SET comments = $1, version = version + 1 \
             WHERE id = $2 AND version = $3",
        )
        .bind(Json(&comments))
        .bind(post_id)
        .bind(version)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(Some(()));
        }

        tracing::debug!("Comment CAS conflict on post {}, retrying", post_id);
    }
}

/// Delete a post by ID; returns whether a row was removed
pub async fn delete_post(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_post_serialization_hides_version() {
        let post = Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: "hello".to_string(),
            media: Json(Vec::new()),
            reactions: Json(ReactionMap::new()),
            comments: Json(Vec::new()),
            version: 3,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("version").is_none());
        assert_eq!(json["content"], "hello");
        // All six reaction buckets serialize even on a fresh post.
        assert_eq!(json["reactions"].as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_post_with_author_serialization_shape() {
        let post = PostWithAuthor {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: "hello".to_string(),
            media: Json(Vec::new()),
            reactions: Json(ReactionMap::new()),
            comments: Json(Vec::new()),
            version: 0,
            created_at: Utc::now(),
            author_name: "Alice".to_string(),
            author_username: "alice".to_string(),
            author_avatar: None,
            author_is_verified: true,
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["author_username"], "alice");
        assert_eq!(json["author_is_verified"], true);
        assert!(json.get("version").is_none());
    }
}
