//! Account repository trait defining the interface for credential store access.
//!
//! The verification state machine never touches the store directly: services
//! load a snapshot, compute the next state, then persist it through `save`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
///
/// Implementations must enforce that a phone number identifies at most one
/// account. Writes for a single key are assumed to be serialized by the store;
/// no optimistic-concurrency token is carried on the record.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its E.164 phone number
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account for this number
    /// * `Err(DomainError)` - Store failure
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Insert or update an account, keyed by phone number
    ///
    /// # Arguments
    /// * `account` - The full account snapshot to persist
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Auth(AuthError::DuplicateAccount))` - The phone
    ///   number is already owned by a different account id
    /// * `Err(DomainError)` - Store failure
    async fn save(&self, account: Account) -> Result<Account, DomainError>;

    /// Clear code and expiry on every account whose code expired before `now`
    ///
    /// # Returns
    /// * `Ok(count)` - Number of accounts cleaned
    async fn clear_expired_codes(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
