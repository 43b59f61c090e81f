//! Backend Error Types
//!
//! This module defines the error type used by HTTP handlers. Every failure
//! path maps to one of the categories below, and each category carries a
//! fixed HTTP status:
//!
//! - `Validation` - missing or malformed fields (400)
//! - `Unauthorized` - missing credentials (401)
//! - `Forbidden` - invalid token, banned account, missing capability (403)
//! - `NotFound` - missing entity (404)
//! - everything else - unclassified server error (500)
//!
//! Errors surface to the caller as a JSON body; see
//! [`conversion`](super::conversion) for the response shape.

use crate::shared::SharedError;
use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error type returned by handlers
#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing or malformed input
    #[error("{message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Missing credentials
    #[error("{message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Credentials present but not acceptable (invalid token, banned
    /// account, missing capability)
    #[error("{message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Requested entity does not exist
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Shared error (from the domain layer)
    #[error(transparent)]
    Shared(#[from] SharedError),

    /// Serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unclassified server error
    #[error("{message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },
}

impl BackendError {
    /// Create a validation error (400)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an unauthorized error (401)
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a forbidden error (403)
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a not-found error (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an internal server error (500)
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Shared(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message surfaced to the caller.
    ///
    /// Database and serialization details are not leaked; callers see a
    /// generic message while the specifics go to the log.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Internal { message } => message.clone(),
            Self::Shared(err) => err.to_string(),
            Self::Database(_) | Self::Serialization(_) => "Server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            BackendError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BackendError::unauthorized("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BackendError::forbidden("banned").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            BackendError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BackendError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_errors_do_not_leak() {
        let error = BackendError::Database(sqlx::Error::RowNotFound);
        assert_eq!(error.message(), "Server error");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_shared_validation_error() {
        use assert_matches::assert_matches;

        let shared = SharedError::validation("text", "cannot be empty");
        let backend: BackendError = shared.into();
        assert_matches!(&backend, BackendError::Shared(_));
        assert_eq!(backend.status_code(), StatusCode::BAD_REQUEST);
        assert!(backend.message().contains("cannot be empty"));
    }
}
