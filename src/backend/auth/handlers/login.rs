//! Login Handler
//!
//! POST /api/login
//!
//! Verifies the credentials against the stored bcrypt hash and issues a JWT.
//! Unknown email and wrong password both produce the same 401 message, so a
//! caller cannot probe which emails are registered.

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::error::BackendError;
use crate::backend::users::db;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - missing email or password
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500 Internal Server Error` - token failure
pub async fn login(
    State(pool): State<PgPool>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(BackendError::validation("Email and password are required"));
    }

    let mut user = db::find_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| BackendError::unauthorized("Invalid email or password"))?;

    let password_ok = bcrypt::verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification failed: {:?}", e);
        BackendError::internal("Server error")
    })?;

    if !password_ok {
        tracing::debug!("Wrong password for {}", request.email);
        return Err(BackendError::unauthorized("Invalid email or password"));
    }

    // Admin accounts carry the verified badge implicitly.
    if user.is_admin() && !user.is_verified {
        if let Some(updated) = db::approve_verification(&pool, user.id).await? {
            user = updated;
        }
    }

    let token = create_token(user.id, user.email.clone()).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("Server error")
    })?;

    tracing::info!("User logged in: {}", user.username);

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: UserResponse::from(user),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn lazy_pool() -> PgPool {
        sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .expect("lazy pool")
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let result = login(
            State(lazy_pool()),
            Json(LoginRequest {
                email: "".to_string(),
                password: "password123".to_string(),
            }),
        )
        .await;

        let err = result.err().expect("expected validation error");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_missing_password() {
        let result = login(
            State(lazy_pool()),
            Json(LoginRequest {
                email: "a@example.com".to_string(),
                password: "".to_string(),
            }),
        )
        .await;

        let err = result.err().expect("expected validation error");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
