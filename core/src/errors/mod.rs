//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError};

use pv_shared::error_codes;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Internal { .. } | DomainError::Database { .. } => {
                error_codes::INTERNAL_ERROR
            }
            DomainError::Auth(e) => e.error_code(),
            DomainError::Token(e) => e.error_code(),
        }
    }

    /// Whether this error may be shown to the caller as-is
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, DomainError::Internal { .. } | DomainError::Database { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
