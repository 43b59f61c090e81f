//! Authentication
//!
//! JWT session tokens and the register/login/me handlers.

/// JWT token creation and verification
pub mod sessions;

/// Registration, login and current-user handlers
pub mod handlers;

pub use handlers::{get_me, login, register};
