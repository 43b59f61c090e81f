//! Authentication Middleware
//!
//! This module protects routes that require a logged-in user. It extracts
//! the JWT from the `Authorization` header, verifies it, loads the full user
//! row, and rejects banned accounts. The loaded user is attached to request
//! extensions so handlers can take it via the [`AuthUser`] extractor.
//!
//! Status codes follow the REST surface: a missing token is 401, while an
//! invalid token, a deleted user, or a banned account is 403.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::users::db::{self, User};

/// Authenticated user attached to request extensions
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Authentication middleware
///
/// 1. Extracts the JWT from the Authorization header
/// 2. Verifies the token signature and expiry
/// 3. Loads the user row and rejects banned accounts
/// 4. Attaches the user to request extensions for handlers
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            BackendError::unauthorized("No token provided")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::debug!("Invalid Authorization header format");
        BackendError::unauthorized("No token provided")
    })?;

    let claims = verify_token(token).map_err(|e| {
        tracing::debug!("Invalid token: {:?}", e);
        BackendError::forbidden("Invalid token")
    })?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| BackendError::forbidden("Invalid token"))?;

    let user = db::find_by_id(&app_state.db_pool, user_id)
        .await?
        .ok_or_else(|| BackendError::forbidden("User not found"))?;

    if user.banned {
        tracing::info!("Rejected banned user {}", user.id);
        return Err(BackendError::forbidden("Your account is banned"));
    }

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Extractor for the authenticated user
///
/// Usable as a handler parameter on any route behind [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("CurrentUser not found in request extensions");
                BackendError::unauthorized("No token provided")
            })?;

        Ok(AuthUser(user))
    }
}

/// Extractor for the moderation capability
///
/// Succeeds only when the authenticated user's role grants admin rights;
/// everyone else gets 403.
#[derive(Clone, Debug)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            tracing::info!("User {} denied admin access", user.id);
            return Err(BackendError::forbidden("Admin access required"));
        }

        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            user_id: 1_000_000_001,
            name: "Test".to_string(),
            username: "test".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            avatar: None,
            bio: None,
            banned: false,
            is_verified: false,
            verification_requested: false,
            role: role.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_current_user_extension_round_trip() {
        let user = sample_user("user");
        let mut request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        request.extensions_mut().insert(CurrentUser(user.clone()));

        let stored = request.extensions().get::<CurrentUser>().unwrap();
        assert_eq!(stored.0.id, user.id);
    }

    #[test]
    fn test_admin_capability_follows_role() {
        assert!(sample_user("admin").is_admin());
        assert!(!sample_user("user").is_admin());
    }
}
