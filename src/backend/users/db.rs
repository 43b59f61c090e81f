//! User Model and Database Operations
//!
//! This module handles user data and database operations: creation, lookup,
//! profile updates, search, verification state, and moderation flags.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Column list shared by every full-row query
const USER_COLUMNS: &str = "id, user_id, name, username, email, password_hash, avatar, bio, \
     banned, is_verified, verification_requested, role, created_at";

/// Column list for listing/search projections
const SUMMARY_COLUMNS: &str =
    "id, user_id, name, username, avatar, banned, is_verified, created_at";

/// Role granted to a user account
///
/// Moderation endpoints check this via [`User::is_admin`] rather than
/// comparing against a fixed account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Parse a role from its storage form
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Storage form of this role
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Public numeric id shown in profiles
    pub user_id: i64,
    /// Display name
    pub name: String,
    /// Username (unique)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Avatar URL
    pub avatar: Option<String>,
    /// Profile bio
    pub bio: Option<String>,
    /// Banned flag; banned accounts are rejected by the auth middleware
    pub banned: bool,
    /// Verified badge flag
    pub is_verified: bool,
    /// Pending verification request flag
    pub verification_requested: bool,
    /// Account role, stored as text
    pub role: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The account's role
    pub fn role(&self) -> UserRole {
        UserRole::from_str(&self.role).unwrap_or(UserRole::User)
    }

    /// Whether this account holds the moderation capability
    pub fn is_admin(&self) -> bool {
        self.role() == UserRole::Admin
    }
}

/// Reduced projection used by search results and admin listings
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub user_id: i64,
    pub name: String,
    pub username: String,
    pub avatar: Option<String>,
    pub banned: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Generate a random public numeric id (10 digits)
fn generate_public_id() -> i64 {
    rand::thread_rng().gen_range(1_000_000_000i64..10_000_000_000i64)
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `name` - Display name
/// * `username` - Unique username
/// * `email` - Unique email
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error
pub async fn create_user(
    pool: &PgPool,
    name: &str,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (user_id, name, username, email, password_hash)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(generate_public_id())
    .bind(name)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Get user by username
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Get user by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Update profile fields; absent fields keep their current value
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    username: Option<&str>,
    bio: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET name = COALESCE($1, name),
            username = COALESCE($2, username),
            bio = COALESCE($3, bio)
        WHERE id = $4
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(name)
    .bind(username)
    .bind(bio)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Update the avatar URL
pub async fn update_avatar(
    pool: &PgPool,
    id: Uuid,
    avatar: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET avatar = $1 WHERE id = $2 RETURNING {USER_COLUMNS}"
    ))
    .bind(avatar)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Case-insensitive substring search over username and display name
pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(&format!(
        r#"
        SELECT {SUMMARY_COLUMNS} FROM users
        WHERE username ILIKE $1 OR name ILIKE $1
        LIMIT 20
        "#
    ))
    .bind(format!("%{}%", query))
    .fetch_all(pool)
    .await
}

/// Flag a pending verification request
pub async fn request_verification(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET verification_requested = TRUE WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Grant the verified badge and clear the pending request
pub async fn approve_verification(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users SET is_verified = TRUE, verification_requested = FALSE
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Clear a pending verification request without granting the badge
pub async fn reject_verification(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET verification_requested = FALSE WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Remove the verified badge
pub async fn revoke_verification(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET is_verified = FALSE WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Users with a pending verification request, newest first
pub async fn verification_requests(pool: &PgPool) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(&format!(
        r#"
        SELECT {SUMMARY_COLUMNS} FROM users
        WHERE verification_requested = TRUE
        ORDER BY created_at DESC
        "#
    ))
    .fetch_all(pool)
    .await
}

/// Verified users, newest first
pub async fn verified_users(pool: &PgPool) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(&format!(
        r#"
        SELECT {SUMMARY_COLUMNS} FROM users
        WHERE is_verified = TRUE
        ORDER BY created_at DESC
        "#
    ))
    .fetch_all(pool)
    .await
}

/// Set the banned flag
pub async fn ban_user(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET banned = TRUE WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Clear the banned flag
pub async fn unban_user(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET banned = FALSE WHERE id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// All users, newest first
pub async fn all_users(pool: &PgPool) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {SUMMARY_COLUMNS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Banned users, newest first
pub async fn banned_users(pool: &PgPool) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {SUMMARY_COLUMNS} FROM users WHERE banned = TRUE ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Search within banned users
pub async fn search_banned(pool: &PgPool, query: &str) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(&format!(
        r#"
        SELECT {SUMMARY_COLUMNS} FROM users
        WHERE banned = TRUE AND (username ILIKE $1 OR name ILIKE $1)
        ORDER BY created_at DESC
        "#
    ))
    .bind(format!("%{}%", query))
    .fetch_all(pool)
    .await
}

/// Count all users
pub async fn count_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

/// Count banned users
pub async fn count_banned(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE banned = TRUE")
        .fetch_one(pool)
        .await
}

/// Delete a user; posts, follow edges and notifications cascade
pub async fn delete_user(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
