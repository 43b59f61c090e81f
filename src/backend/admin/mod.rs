//! Admin moderation endpoints

/// Stats, user listings, ban/unban, post deletion, verification management
pub mod handlers;
