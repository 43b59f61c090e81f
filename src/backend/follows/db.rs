//! Database operations for the follow relation.
//!
//! Follow edges are a plain `(follower_id, following_id)` pair with toggle
//! semantics: inserting when absent, deleting when present. Self-loops are
//! rejected at the API layer only; this module does not enforce them.

use sqlx::PgPool;
use uuid::Uuid;

/// Toggle the follow edge from `follower_id` to `following_id`.
///
/// Returns `true` when the edge now exists (followed), `false` when it was
/// removed (unfollowed).
pub async fn toggle(
    pool: &PgPool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let existing = sqlx::query(
        "SELECT 1 FROM followers WHERE follower_id = $1 AND following_id = $2",
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_optional(pool)
    .await?;

    if existing.is_some() {
        sqlx::query("DELETE FROM followers WHERE follower_id = $1 AND following_id = $2")
            .bind(follower_id)
            .bind(following_id)
            .execute(pool)
            .await?;
        Ok(false)
    } else {
        sqlx::query("INSERT INTO followers (follower_id, following_id) VALUES ($1, $2)")
            .bind(follower_id)
            .bind(following_id)
            .execute(pool)
            .await?;
        Ok(true)
    }
}

/// Ids of users that `user_id` follows
pub async fn following(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT following_id FROM followers WHERE follower_id = $1")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Ids of users following `user_id`
pub async fn followers(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT follower_id FROM followers WHERE following_id = $1")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Whether `follower_id` currently follows `following_id`
pub async fn is_following(
    pool: &PgPool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        "SELECT 1 FROM followers WHERE follower_id = $1 AND following_id = $2",
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

/// Follower count for a user
pub async fn follower_count(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM followers WHERE following_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Following count for a user
pub async fn following_count(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM followers WHERE follower_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}
