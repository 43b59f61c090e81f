//! Post store and handlers

/// Post rows, feed queries, and versioned document updates
pub mod db;

/// Feed, post creation, reaction and comment handlers
pub mod handlers;

pub use db::{Post, PostWithAuthor};
