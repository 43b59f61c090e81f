//! Authenticated API Routes
//!
//! Every route in this table sits behind the bearer-token middleware: the
//! JWT is verified, the user row is loaded, and banned accounts are
//! rejected before any handler runs. Admin routes additionally require the
//! admin role via the `AdminUser` extractor.
//!
//! # Routes
//!
//! ## Profile
//! - `GET /api/me` - Current user
//! - `PUT /api/profile` - Update profile fields
//! - `POST /api/avatar` - Upload avatar (multipart)
//! - `POST /api/verification/request` - Request the verified badge
//! - `DELETE /api/account` - Delete the account
//!
//! ## Users
//! - `GET /api/users/search?q=` - Search users
//! - `GET /api/users/{user_id}` - Public profile
//! - `GET /api/users/{user_id}/posts` - A user's posts
//! - `POST /api/users/{user_id}/follow` - Toggle following
//!
//! ## Posts
//! - `GET /api/feed?page&limit` - Global feed
//! - `POST /api/posts` - Create post (multipart, up to 5 media files)
//! - `POST /api/posts/{post_id}/reactions` - Toggle a reaction
//! - `POST /api/posts/{post_id}/comments` - Append a comment
//!
//! ## Notifications
//! - `GET /api/notifications` - List notifications
//! - `POST /api/notifications/read` - Bulk mark read
//!
//! ## Admin (role-gated)
//! - `GET /api/admin/stats`
//! - `GET /api/admin/users` / `GET /api/admin/banned`
//! - `POST /api/admin/ban/{user_id}` / `POST /api/admin/unban/{user_id}`
//! - `DELETE /api/admin/posts/{post_id}`
//! - `GET /api/admin/verification/requests` / `.../verified`
//! - `POST /api/admin/verification/{approve|reject|revoke}/{user_id}`

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::admin;
use crate::backend::auth::get_me;
use crate::backend::follows::handlers::toggle_follow;
use crate::backend::middleware::auth_middleware;
use crate::backend::notifications::handlers::{list_notifications, mark_notifications_read};
use crate::backend::posts::handlers::{
    comment_on_post, create_post, get_feed, get_user_posts, react_to_post,
};
use crate::backend::server::state::AppState;
use crate::backend::users::handlers::{
    delete_account, get_user_profile, request_verification, search_users, update_profile,
    upload_avatar,
};

/// Build the authenticated route table
pub fn configure_api_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        // Profile
        .route("/api/me", get(get_me))
        .route("/api/profile", put(update_profile))
        .route("/api/avatar", post(upload_avatar))
        .route("/api/verification/request", post(request_verification))
        .route("/api/account", delete(delete_account))
        // Users
        .route("/api/users/search", get(search_users))
        .route("/api/users/{user_id}", get(get_user_profile))
        .route("/api/users/{user_id}/posts", get(get_user_posts))
        .route("/api/users/{user_id}/follow", post(toggle_follow))
        // Posts
        .route("/api/feed", get(get_feed))
        .route("/api/posts", post(create_post))
        .route("/api/posts/{post_id}/reactions", post(react_to_post))
        .route("/api/posts/{post_id}/comments", post(comment_on_post))
        // Notifications
        .route("/api/notifications", get(list_notifications))
        .route("/api/notifications/read", post(mark_notifications_read))
        // Admin
        .route("/api/admin/stats", get(admin::handlers::stats))
        .route("/api/admin/users", get(admin::handlers::list_users))
        .route("/api/admin/banned", get(admin::handlers::list_banned))
        .route("/api/admin/ban/{user_id}", post(admin::handlers::ban_user))
        .route(
            "/api/admin/unban/{user_id}",
            post(admin::handlers::unban_user),
        )
        .route(
            "/api/admin/posts/{post_id}",
            delete(admin::handlers::delete_post),
        )
        .route(
            "/api/admin/verification/requests",
            get(admin::handlers::verification_requests),
        )
        .route(
            "/api/admin/verification/verified",
            get(admin::handlers::verified_users),
        )
        .route(
            "/api/admin/verification/approve/{user_id}",
            post(admin::handlers::approve_verification),
        )
        .route(
            "/api/admin/verification/reject/{user_id}",
            post(admin::handlers::reject_verification),
        )
        .route(
            "/api/admin/verification/revoke/{user_id}",
            post(admin::handlers::revoke_verification),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
}
