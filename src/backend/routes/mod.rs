//! Route configuration

/// Main router assembly
pub mod router;

/// Authenticated API route table
pub mod api_routes;

pub use router::create_router;
