//! Notification store, dispatch, and handlers

/// Notification rows and database operations
pub mod db;

/// Persist-and-push dispatch helper
pub mod dispatch;

/// List and mark-read handlers
pub mod handlers;

pub use db::Notification;
pub use dispatch::notify;
