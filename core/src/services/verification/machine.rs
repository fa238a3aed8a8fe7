//! Code generation, admission and verification

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};

use crate::domain::entities::account::Account;

use super::types::{AdmissionDecision, IssuedCode, Transition, VerificationFailure};

/// Length of a verification code
pub const CODE_LENGTH: usize = 6;

/// Code generations allowed before the cooldown applies
pub const MAX_CODE_REQUESTS: u32 = 5;

/// Cooldown after the cap is reached, measured from the last generation
pub const COOLDOWN_MINUTES: i64 = 15;

/// Default code lifetime (2 minutes)
pub const DEFAULT_CODE_TTL_MS: i64 = 120_000;

const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// Decide whether a new code may be generated
///
/// Below the cap requests are always admitted. At or above it, a request
/// inside the cooldown is denied with the remaining minutes rounded up;
/// once the cooldown has elapsed the attempt counter is reset and the
/// request admitted. The window slides from the most recent generation.
///
/// # Returns
/// The decision, plus the account with the counter reset when the cooldown
/// has elapsed
pub fn can_request_code(account: &Account, now: DateTime<Utc>) -> Transition<AdmissionDecision> {
    let mut next = account.clone();

    if account.verification_attempts < MAX_CODE_REQUESTS {
        return Transition::new(AdmissionDecision::allow(), next);
    }

    let cooldown = Duration::minutes(COOLDOWN_MINUTES);
    let elapsed = account
        .last_verification_attempt
        .map(|last| now - last)
        .unwrap_or(cooldown);

    if elapsed >= cooldown {
        next.verification_attempts = 0;
        return Transition::new(AdmissionDecision::allow(), next);
    }

    let remaining_ms = (cooldown - elapsed).num_milliseconds();
    let minutes = ((remaining_ms + 59_999) / 60_000).clamp(1, COOLDOWN_MINUTES) as u32;

    Transition::new(AdmissionDecision::deny(minutes), next)
}

/// Generate a new code for the account
///
/// Replaces any outstanding code, sets its expiry to `now + ttl`, bumps the
/// attempt counter and stamps the attempt time. Admission is not checked
/// here; callers run `can_request_code` first.
pub fn generate_code(account: &Account, now: DateTime<Utc>, ttl: Duration) -> Transition<IssuedCode> {
    let code = generate_secure_code();
    let expires_at = now + ttl;

    let mut next = account.clone();
    next.verification_code = Some(code.clone());
    next.verification_code_expiry = Some(expires_at);
    next.verification_attempts = account.verification_attempts.saturating_add(1);
    next.last_verification_attempt = Some(now);

    Transition::new(IssuedCode { code, expires_at }, next)
}

/// Check a candidate code against the outstanding one
///
/// Failures are reported in a fixed order: no code, expired
/// (`now >= expiry`), mismatch. An expired code never reports a mismatch.
/// The candidate is compared verbatim. Failures leave the account untouched
/// and do not count against the attempt cap.
///
/// On success the phone is marked verified, the code fields are cleared and
/// the attempt counter is reset.
pub fn verify_code(
    account: &Account,
    candidate: &str,
    now: DateTime<Utc>,
) -> Transition<Result<(), VerificationFailure>> {
    let (stored, expiry) = match (&account.verification_code, account.verification_code_expiry) {
        (Some(code), Some(expiry)) => (code, expiry),
        _ => return Transition::new(Err(VerificationFailure::NoCodeIssued), account.clone()),
    };

    if now >= expiry {
        return Transition::new(Err(VerificationFailure::CodeExpired), account.clone());
    }

    if !constant_time_eq(stored.as_bytes(), candidate.as_bytes()) {
        return Transition::new(Err(VerificationFailure::CodeMismatch), account.clone());
    }

    let mut next = account.clone();
    next.is_phone_verified = true;
    next.verification_code = None;
    next.verification_code_expiry = None;
    next.verification_attempts = 0;

    Transition::new(Ok(()), next)
}

/// Clear an expired code
///
/// # Returns
/// `true` when a code was cleared
pub fn sweep_expired(account: &Account, now: DateTime<Utc>) -> Transition<bool> {
    if !account.has_outstanding_code() || !account.is_code_expired(now) {
        return Transition::new(false, account.clone());
    }

    let mut next = account.clone();
    next.verification_code = None;
    next.verification_code_expiry = None;
    Transition::new(true, next)
}

/// Uniform 6-digit code from the OS CSPRNG, never with a leading zero
pub fn generate_secure_code() -> String {
    OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}
