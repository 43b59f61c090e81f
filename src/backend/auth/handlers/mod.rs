//! Authentication Handlers
//!
//! Registration, login, and the current-user endpoint.

/// Request/response types
pub mod types;

/// POST /api/register
pub mod register;

/// POST /api/login
pub mod login;

/// GET /api/me
pub mod me;

pub use login::login;
pub use me::get_me;
pub use register::register;
