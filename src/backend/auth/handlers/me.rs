//! Current User Handler
//!
//! GET /api/me
//!
//! The auth middleware has already loaded a fresh user row and rejected
//! banned accounts, so this handler only reshapes it for the wire.

use axum::response::Json;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// Get the authenticated user's own profile
pub async fn get_me(AuthUser(user): AuthUser) -> Result<Json<UserResponse>, BackendError> {
    Ok(Json(UserResponse::from(user)))
}
