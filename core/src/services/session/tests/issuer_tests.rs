//! Unit tests for the session issuer

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use crate::domain::entities::account::Account;
use crate::domain::entities::session::SessionClaims;
use crate::errors::TokenError;
use crate::services::session::{JwtCodec, SessionConfig, SessionIssuer, TokenCodec};

fn issuer() -> SessionIssuer {
    let config = SessionConfig::default();
    let codec = JwtCodec::new("issuer-test-secret", &config.issuer, &config.audience);
    SessionIssuer::new(Arc::new(codec), config)
}

/// Codec whose signing always fails
struct BrokenCodec;

impl TokenCodec for BrokenCodec {
    fn sign(&self, _claims: &SessionClaims) -> Result<String, TokenError> {
        Err(TokenError::GenerationFailed)
    }

    fn verify(&self, _token: &str, _now: chrono::DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        Err(TokenError::Invalid)
    }
}

#[test]
fn test_issue_uses_seven_day_ttl() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let account = Account::provisional("+15551230000", now);

    let session = issuer().issue(&account, now).unwrap();

    assert_eq!(session.expires_at, now + Duration::days(7));
    assert_eq!(session.claims.sub, account.id.to_string());
    assert!(!session.claims.is_phone_verified);

    let verified = issuer().verify(&session.token, now).unwrap();
    assert_eq!(verified, session.claims);
}

#[test]
fn test_claims_are_a_snapshot() {
    let now = Utc::now();
    let mut account = Account::provisional("+15551230000", now);
    let session = issuer().issue(&account, now).unwrap();

    account.is_phone_verified = true;

    let claims = issuer().verify(&session.token, now).unwrap();
    assert!(!claims.is_phone_verified);
}

#[test]
fn test_maybe_refresh_skips_fresh_sessions() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let account = Account::provisional("+15551230000", now);
    let session = issuer().issue(&account, now).unwrap();

    assert!(issuer()
        .maybe_refresh(&session.claims, &account, now + Duration::days(6))
        .is_none());
}

#[test]
fn test_maybe_refresh_reissues_with_current_state() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut account = Account::provisional("+15551230000", now);
    let session = issuer().issue(&account, now).unwrap();

    account.is_phone_verified = true;
    let later = now + Duration::days(7) - Duration::minutes(30);

    let refreshed = issuer()
        .maybe_refresh(&session.claims, &account, later)
        .expect("session within refresh threshold");

    assert!(refreshed.claims.is_phone_verified);
    assert_eq!(refreshed.expires_at, later + Duration::days(7));
    assert_ne!(refreshed.claims.jti, session.claims.jti);
}

#[test]
fn test_maybe_refresh_swallows_signing_failure() {
    let now = Utc::now();
    let account = Account::provisional("+15551230000", now);
    let claims = SessionClaims::for_account(&account, now, Duration::minutes(5), "iss", "aud");
    let broken = SessionIssuer::new(Arc::new(BrokenCodec), SessionConfig::default());

    assert!(broken.maybe_refresh(&claims, &account, now).is_none());
    assert_eq!(broken.issue(&account, now).unwrap_err(), TokenError::GenerationFailed);
}
