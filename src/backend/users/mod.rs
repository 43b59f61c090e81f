//! User store and profile handlers

/// User rows and database operations
pub mod db;

/// Profile, search, verification and account handlers
pub mod handlers;

pub use db::{User, UserRole, UserSummary};
