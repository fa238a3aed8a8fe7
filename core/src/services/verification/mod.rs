//! Verification code state machine
//!
//! Pure functions over an `Account` snapshot. Each returns a `Transition`
//! carrying the outcome and the next account state; persisting that state is
//! the caller's job. States per account:
//!
//! - no code outstanding
//! - code active (until expiry or successful confirmation)
//! - verified (sticky, `is_phone_verified` never reverts)

mod config;
mod machine;
mod types;


pub use config::VerificationPolicy;
pub use machine::{
    can_request_code, generate_code, generate_secure_code, sweep_expired, verify_code,
    CODE_LENGTH, COOLDOWN_MINUTES, DEFAULT_CODE_TTL_MS, MAX_CODE_REQUESTS,
};
pub use types::{AdmissionDecision, DenialReason, IssuedCode, Transition, VerificationFailure};
