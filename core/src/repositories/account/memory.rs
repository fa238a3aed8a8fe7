//! In-memory implementation of AccountRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};
use crate::services::verification::sweep_expired;

use super::trait_::AccountRepository;

/// Account store kept for the lifetime of the process, keyed by phone number
///
/// Used when no database is configured and throughout the test suites.
#[derive(Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(phone_number).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.id == id).cloned())
    }

    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if let Some(existing) = accounts.get(&account.phone_number) {
            if existing.id != account.id {
                return Err(AuthError::DuplicateAccount.into());
            }
        }

        accounts.insert(account.phone_number.clone(), account.clone());
        Ok(account)
    }

    async fn clear_expired_codes(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut accounts = self.accounts.write().await;
        let mut cleared = 0;

        for account in accounts.values_mut() {
            let (swept, next) = sweep_expired(account, now).into_parts();
            if swept {
                *account = next;
                cleared += 1;
            }
        }

        Ok(cleared)
    }
}
