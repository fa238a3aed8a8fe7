//! Unit tests for the in-memory account repository

use chrono::{Duration, Utc};

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};
use crate::repositories::account::{AccountRepository, InMemoryAccountRepository};

#[tokio::test]
async fn test_save_and_find() {
    let repo = InMemoryAccountRepository::new();
    let account = Account::provisional("+15551230000", Utc::now());

    repo.save(account.clone()).await.unwrap();

    let by_phone = repo.find_by_phone("+15551230000").await.unwrap();
    assert_eq!(by_phone.as_ref().map(|a| a.id), Some(account.id));

    let by_id = repo.find_by_id(account.id).await.unwrap();
    assert_eq!(by_id.map(|a| a.phone_number), Some("+15551230000".to_string()));
}

#[tokio::test]
async fn test_find_missing_returns_none() {
    let repo = InMemoryAccountRepository::new();
    assert!(repo.find_by_phone("+15550000000").await.unwrap().is_none());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_save_upserts_same_account() {
    let repo = InMemoryAccountRepository::new();
    let mut account = Account::provisional("+15551230000", Utc::now());
    repo.save(account.clone()).await.unwrap();

    account.verification_attempts = 3;
    repo.save(account.clone()).await.unwrap();

    let stored = repo.find_by_phone("+15551230000").await.unwrap().unwrap();
    assert_eq!(stored.verification_attempts, 3);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_save_rejects_second_account_for_phone() {
    let repo = InMemoryAccountRepository::new();
    repo.save(Account::provisional("+15551230000", Utc::now()))
        .await
        .unwrap();

    let result = repo
        .save(Account::provisional("+15551230000", Utc::now()))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateAccount))
    ));
}

#[tokio::test]
async fn test_clear_expired_codes() {
    let repo = InMemoryAccountRepository::new();
    let now = Utc::now();

    let mut expired = Account::provisional("+15551230000", now);
    expired.verification_code = Some("123456".to_string());
    expired.verification_code_expiry = Some(now - Duration::seconds(1));
    repo.save(expired).await.unwrap();

    let mut live = Account::provisional("+15559998888", now);
    live.verification_code = Some("654321".to_string());
    live.verification_code_expiry = Some(now + Duration::minutes(2));
    repo.save(live).await.unwrap();

    let cleared = repo.clear_expired_codes(now).await.unwrap();
    assert_eq!(cleared, 1);

    let expired = repo.find_by_phone("+15551230000").await.unwrap().unwrap();
    assert!(expired.verification_code.is_none());
    assert!(expired.verification_code_expiry.is_none());

    let live = repo.find_by_phone("+15559998888").await.unwrap().unwrap();
    assert_eq!(live.verification_code.as_deref(), Some("654321"));
}
