//! Types returned by the verification state machine

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entities::account::Account;
use crate::errors::AuthError;

/// Outcome of a state-machine step together with the next account state
#[derive(Debug, Clone)]
pub struct Transition<T> {
    pub outcome: T,
    /// Account snapshot the caller should persist
    pub account: Account,
}

impl<T> Transition<T> {
    pub fn new(outcome: T, account: Account) -> Self {
        Self { outcome, account }
    }

    /// Split into `(outcome, account)`
    pub fn into_parts(self) -> (T, Account) {
        (self.outcome, self.account)
    }
}

/// Why a code request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// Attempt cap reached inside the cooldown window
    CooldownActive,
}

/// Result of the admission check gating new code generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionDecision {
    pub allowed: bool,
    /// Whole minutes until a request is admitted again, rounded up
    pub retry_after_minutes: Option<u32>,
    pub reason: Option<DenialReason>,
}

impl AdmissionDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            retry_after_minutes: None,
            reason: None,
        }
    }

    pub fn deny(retry_after_minutes: u32) -> Self {
        Self {
            allowed: false,
            retry_after_minutes: Some(retry_after_minutes),
            reason: Some(DenialReason::CooldownActive),
        }
    }
}

/// A freshly generated code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Verification failures, checked in declaration order
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    #[error("no code issued")]
    NoCodeIssued,

    #[error("code expired")]
    CodeExpired,

    #[error("code mismatch")]
    CodeMismatch,
}

impl From<VerificationFailure> for AuthError {
    fn from(failure: VerificationFailure) -> Self {
        match failure {
            VerificationFailure::NoCodeIssued => AuthError::NoCodeIssued,
            VerificationFailure::CodeExpired => AuthError::CodeExpired,
            VerificationFailure::CodeMismatch => AuthError::CodeMismatch,
        }
    }
}
