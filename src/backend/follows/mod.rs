//! Follow store and handler

/// Follow edge database operations
pub mod db;

/// Follow toggle handler
pub mod handlers;
