//! Error types for verification, account and session operations
//!
//! Each variant maps to a stable machine-readable code through `error_code()`,
//! which the HTTP layer uses verbatim in its error bodies.

use pv_shared::error_codes;
use thiserror::Error;

/// Authentication and verification errors
///
/// All of these are expected, user-correctable conditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid phone format: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Too many verification requests. Please try again in {minutes} minutes")]
    RateLimitExceeded { minutes: u32 },

    #[error("No verification code has been issued for this number")]
    NoCodeIssued,

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Verification code does not match")]
    CodeMismatch,

    #[error("Failed to deliver verification code. Please try again")]
    TransportFailure,

    #[error("An account already exists for this phone number")]
    DuplicateAccount,

    #[error("Invalid phone number or password")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Account not found")]
    AccountNotFound,
}

impl AuthError {
    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidPhoneFormat { .. } => error_codes::INVALID_PHONE_FORMAT,
            AuthError::RateLimitExceeded { .. } => error_codes::RATE_LIMIT_EXCEEDED,
            AuthError::NoCodeIssued => error_codes::NO_CODE_ISSUED,
            AuthError::CodeExpired => error_codes::CODE_EXPIRED,
            AuthError::CodeMismatch => error_codes::CODE_MISMATCH,
            AuthError::TransportFailure => error_codes::TRANSPORT_FAILURE,
            AuthError::DuplicateAccount => error_codes::DUPLICATE_ACCOUNT,
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::AccountDisabled => error_codes::ACCOUNT_DISABLED,
            AuthError::AccountNotFound => error_codes::ACCOUNT_NOT_FOUND,
        }
    }
}

/// Session credential errors
///
/// `Expired`, `Malformed` and `Invalid` stay distinct so callers can tell
/// the user whether to sign in again or whether the credential was garbage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Session expired")]
    Expired,

    #[error("Session credential is malformed")]
    Malformed,

    #[error("Session credential is invalid")]
    Invalid,

    #[error("Session generation failed")]
    GenerationFailed,
}

impl TokenError {
    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::Expired => error_codes::CREDENTIAL_EXPIRED,
            TokenError::Malformed => error_codes::CREDENTIAL_MALFORMED,
            TokenError::Invalid => error_codes::CREDENTIAL_INVALID,
            TokenError::GenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
        }
    }
}
