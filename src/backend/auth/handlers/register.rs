//! Registration Handler
//!
//! POST /api/register
//!
//! # Registration Process
//!
//! 1. Validate required fields, username length, password length
//! 2. Check email and username uniqueness
//! 3. Hash the password with bcrypt
//! 4. Create the user row with a fresh public numeric id
//! 5. Issue a JWT and return it with the sanitized user
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt at DEFAULT_COST
//! - The password hash never appears in a response

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::error::BackendError;
use crate::backend::users::db;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - missing fields, short username/password, or a
///   duplicate email/username
/// * `500 Internal Server Error` - hashing, insert, or token failure
pub async fn register(
    State(pool): State<PgPool>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    tracing::info!("Register request for username: {}", request.username);

    if request.name.trim().is_empty()
        || request.username.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(BackendError::validation("All fields are required"));
    }

    if request.username.len() < 4 {
        return Err(BackendError::validation(
            "Username must be at least 4 characters",
        ));
    }

    if request.password.len() < 8 {
        return Err(BackendError::validation(
            "Password must be at least 8 characters",
        ));
    }

    if !request.email.contains('@') {
        return Err(BackendError::validation("Invalid email format"));
    }

    if db::find_by_email(&pool, &request.email).await?.is_some() {
        tracing::debug!("Email already registered: {}", request.email);
        return Err(BackendError::validation(
            "A user with this email already exists",
        ));
    }

    if db::find_by_username(&pool, &request.username)
        .await?
        .is_some()
    {
        tracing::debug!("Username already taken: {}", request.username);
        return Err(BackendError::validation("This username is already taken"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::internal("Server error")
    })?;

    let user = db::create_user(
        &pool,
        request.name.trim(),
        request.username.trim(),
        request.email.trim(),
        &password_hash,
    )
    .await?;

    let token = create_token(user.id, user.email.clone()).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("Server error")
    })?;

    tracing::info!("User created: {} ({})", user.username, user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Registration successful".to_string(),
            token,
            user: UserResponse::from(user),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Field validation is checked before any database access, so these run
    // against a lazily-connecting pool that never gets used.
    fn lazy_pool() -> PgPool {
        sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .expect("lazy pool")
    }

    fn request(name: &str, username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let result = register(
            State(lazy_pool()),
            Json(request("", "alice", "a@example.com", "password123")),
        )
        .await;

        let err = result.err().expect("expected validation error");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_short_username() {
        let result = register(
            State(lazy_pool()),
            Json(request("Alice", "al", "a@example.com", "password123")),
        )
        .await;

        let err = result.err().expect("expected validation error");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("Username"));
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let result = register(
            State(lazy_pool()),
            Json(request("Alice", "alice", "a@example.com", "short")),
        )
        .await;

        let err = result.err().expect("expected validation error");
        assert!(err.message().contains("Password"));
    }

    #[tokio::test]
    async fn test_register_invalid_email() {
        let result = register(
            State(lazy_pool()),
            Json(request("Alice", "alice", "not-an-email", "password123")),
        )
        .await;

        let err = result.err().expect("expected validation error");
        assert!(err.message().contains("email"));
    }
}
