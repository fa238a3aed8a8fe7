//! End-to-end code lifecycle against the in-memory store

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use pv_core::repositories::{AccountRepository, InMemoryAccountRepository};
use pv_core::services::verification::{
    can_request_code, generate_code, verify_code, MAX_CODE_REQUESTS,
};
use pv_core::services::{Clock, MockClock, SweeperConfig, VerificationFailure, VerificationSweeper};
use pv_core::Account;

const PHONE: &str = "+15551230000";

fn clock() -> Arc<MockClock> {
    Arc::new(MockClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()))
}

/// Admit, generate and persist one code, returning it
async fn issue(repo: &InMemoryAccountRepository, now: chrono::DateTime<Utc>) -> Option<String> {
    let account = repo
        .find_by_phone(PHONE)
        .await
        .unwrap()
        .unwrap_or_else(|| Account::provisional(PHONE, now));

    let admission = can_request_code(&account, now);
    if !admission.outcome.allowed {
        return None;
    }
    let (issued, account) = generate_code(&admission.account, now, Duration::minutes(2)).into_parts();
    repo.save(account).await.unwrap();
    Some(issued.code)
}

#[tokio::test]
async fn test_cooldown_slides_from_last_generation() {
    let clock = clock();
    let repo = InMemoryAccountRepository::new();

    for _ in 0..MAX_CODE_REQUESTS {
        assert!(issue(&repo, clock.now()).await.is_some());
        clock.advance(Duration::minutes(2));
    }

    // last generation was two minutes ago
    assert!(issue(&repo, clock.now()).await.is_none());

    let stored = repo.find_by_phone(PHONE).await.unwrap().unwrap();
    let decision = can_request_code(&stored, clock.now()).outcome;
    assert_eq!(decision.retry_after_minutes, Some(13));

    clock.advance(Duration::minutes(13));
    assert!(issue(&repo, clock.now()).await.is_some());

    let stored = repo.find_by_phone(PHONE).await.unwrap().unwrap();
    assert_eq!(stored.verification_attempts, 1);
}

#[tokio::test]
async fn test_newer_code_replaces_older() {
    let clock = clock();
    let repo = InMemoryAccountRepository::new();

    let first = issue(&repo, clock.now()).await.unwrap();
    clock.advance(Duration::seconds(30));
    let second = issue(&repo, clock.now()).await.unwrap();

    let stored = repo.find_by_phone(PHONE).await.unwrap().unwrap();
    if first != second {
        let (outcome, _) = verify_code(&stored, &first, clock.now()).into_parts();
        assert_eq!(outcome, Err(VerificationFailure::CodeMismatch));
    }

    let (outcome, verified) = verify_code(&stored, &second, clock.now()).into_parts();
    assert!(outcome.is_ok());
    assert!(verified.is_phone_verified);
    assert_eq!(verified.verification_attempts, 0);
}

#[tokio::test]
async fn test_sweep_then_verify_reports_no_code() {
    let clock = clock();
    let repo = Arc::new(InMemoryAccountRepository::new());
    let code = issue(&repo, clock.now()).await.unwrap();

    clock.advance(Duration::minutes(2));

    let stored = repo.find_by_phone(PHONE).await.unwrap().unwrap();
    let (outcome, _) = verify_code(&stored, &code, clock.now()).into_parts();
    assert_eq!(outcome, Err(VerificationFailure::CodeExpired));

    let sweeper = VerificationSweeper::new(repo.clone(), clock.clone(), SweeperConfig::default());
    assert_eq!(sweeper.run_once().await.codes_cleared, 1);

    let stored = repo.find_by_phone(PHONE).await.unwrap().unwrap();
    let (outcome, _) = verify_code(&stored, &code, clock.now()).into_parts();
    assert_eq!(outcome, Err(VerificationFailure::NoCodeIssued));
}
