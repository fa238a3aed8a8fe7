//! Unit tests for the JWT codec

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::account::Account;
use crate::domain::entities::session::SessionClaims;
use crate::errors::TokenError;
use crate::services::session::{JwtCodec, TokenCodec};

const SECRET: &str = "test-secret-for-session-codec";

fn codec() -> JwtCodec {
    JwtCodec::new(SECRET, "phone-verify", "phone-verify-clients")
}

fn claims_at(now: chrono::DateTime<Utc>, ttl: Duration) -> SessionClaims {
    let account = Account::provisional("+15551230000", now);
    SessionClaims::for_account(&account, now, ttl, "phone-verify", "phone-verify-clients")
}

#[test]
fn test_sign_verify_round_trip() {
    let now = Utc::now();
    let claims = claims_at(now, Duration::days(7));

    let token = codec().sign(&claims).unwrap();
    let decoded = codec().verify(&token, now).unwrap();

    assert_eq!(decoded, claims);
}

#[test]
fn test_expired_credential() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let claims = claims_at(now, Duration::hours(1));
    let token = codec().sign(&claims).unwrap();

    assert_eq!(
        codec().verify(&token, now + Duration::hours(1)),
        Err(TokenError::Expired)
    );
    assert!(codec().verify(&token, now + Duration::minutes(59)).is_ok());
}

#[test]
fn test_garbage_is_malformed() {
    assert_eq!(
        codec().verify("not-a-jwt", Utc::now()),
        Err(TokenError::Malformed)
    );
    assert_eq!(
        codec().verify("aaa.bbb.ccc", Utc::now()),
        Err(TokenError::Malformed)
    );
}

#[test]
fn test_wrong_secret_is_invalid() {
    let now = Utc::now();
    let token = JwtCodec::new("another-secret", "phone-verify", "phone-verify-clients")
        .sign(&claims_at(now, Duration::hours(1)))
        .unwrap();

    assert_eq!(codec().verify(&token, now), Err(TokenError::Invalid));
}

#[test]
fn test_wrong_audience_is_invalid() {
    let now = Utc::now();
    let token = JwtCodec::new(SECRET, "phone-verify", "someone-else")
        .sign(&claims_at(now, Duration::hours(1)))
        .unwrap();

    assert_eq!(codec().verify(&token, now), Err(TokenError::Invalid));
}

#[test]
fn test_not_yet_valid_is_invalid() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let token = codec().sign(&claims_at(now, Duration::hours(1))).unwrap();

    assert_eq!(
        codec().verify(&token, now - Duration::minutes(5)),
        Err(TokenError::Invalid)
    );
}
