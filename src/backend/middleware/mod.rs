//! Request processing middleware

/// Bearer-token authentication middleware and extractors
pub mod auth;

pub use auth::{auth_middleware, AdminUser, AuthUser};
