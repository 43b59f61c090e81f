//! Request and response types for the authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::backend::users::db::User;

/// POST /api/register request body
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// POST /api/login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Sanitized user returned by API responses; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub user_id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub banned: bool,
    pub is_verified: bool,
    pub verification_requested: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            user_id: user.user_id,
            name: user.name,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            bio: user.bio,
            banned: user.banned,
            is_verified: user.is_verified,
            verification_requested: user.verification_requested,
        }
    }
}

/// Response for successful registration and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}
