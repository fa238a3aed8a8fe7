//! MySQL implementation of the AccountRepository trait.
//!
//! Accounts live in a single `accounts` table keyed by id, with a unique
//! index on the E.164 phone number.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pv_core::domain::entities::account::Account;
use pv_core::errors::{AuthError, DomainError};
use pv_core::repositories::AccountRepository;

const ACCOUNT_COLUMNS: &str = r#"
    id, phone_number, password_hash, is_phone_verified, is_active,
    verification_code, verification_code_expiry, verification_attempts,
    last_verification_attempt, created_at, last_login_at
"#;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| column_error("phone_number", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column_error("password_hash", e))?,
            is_phone_verified: row
                .try_get("is_phone_verified")
                .map_err(|e| column_error("is_phone_verified", e))?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| column_error("is_active", e))?,
            verification_code: row
                .try_get("verification_code")
                .map_err(|e| column_error("verification_code", e))?,
            verification_code_expiry: row
                .try_get::<Option<DateTime<Utc>>, _>("verification_code_expiry")
                .map_err(|e| column_error("verification_code_expiry", e))?,
            verification_attempts: row
                .try_get("verification_attempts")
                .map_err(|e| column_error("verification_attempts", e))?,
            last_verification_attempt: row
                .try_get::<Option<DateTime<Utc>>, _>("last_verification_attempt")
                .map_err(|e| column_error("last_verification_attempt", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| column_error("last_login_at", e))?,
        })
    }

    async fn find_one(&self, column: &str, value: String) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE {} = ? LIMIT 1",
            ACCOUNT_COLUMNS, column
        );

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("phone_number", phone_number.to_string()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("Failed to begin transaction", e))?;

        // Lock the phone's row (or gap) so the owner check and write are atomic
        let owner = sqlx::query("SELECT id FROM accounts WHERE phone_number = ? FOR UPDATE")
            .bind(&account.phone_number)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| query_error("Failed to look up phone owner", e))?;

        let owner_id = match owner {
            Some(row) => Some(row.try_get::<String, _>("id").map_err(|e| column_error("id", e))?),
            None => None,
        };

        match owner_id {
            Some(owner_id) if owner_id != account.id.to_string() => {
                return Err(AuthError::DuplicateAccount.into());
            }
            Some(_) => {
                let query = r#"
                    UPDATE accounts SET
                        password_hash = ?,
                        is_phone_verified = ?,
                        is_active = ?,
                        verification_code = ?,
                        verification_code_expiry = ?,
                        verification_attempts = ?,
                        last_verification_attempt = ?,
                        last_login_at = ?
                    WHERE id = ?
                "#;

                sqlx::query(query)
                    .bind(&account.password_hash)
                    .bind(account.is_phone_verified)
                    .bind(account.is_active)
                    .bind(&account.verification_code)
                    .bind(account.verification_code_expiry)
                    .bind(account.verification_attempts)
                    .bind(account.last_verification_attempt)
                    .bind(account.last_login_at)
                    .bind(account.id.to_string())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| query_error("Failed to update account", e))?;
            }
            None => {
                let query = format!(
                    "INSERT INTO accounts ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                    ACCOUNT_COLUMNS
                );

                sqlx::query(&query)
                    .bind(account.id.to_string())
                    .bind(&account.phone_number)
                    .bind(&account.password_hash)
                    .bind(account.is_phone_verified)
                    .bind(account.is_active)
                    .bind(&account.verification_code)
                    .bind(account.verification_code_expiry)
                    .bind(account.verification_attempts)
                    .bind(account.last_verification_attempt)
                    .bind(account.created_at)
                    .bind(account.last_login_at)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        if is_unique_violation(&e) {
                            AuthError::DuplicateAccount.into()
                        } else {
                            query_error("Failed to create account", e)
                        }
                    })?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| query_error("Failed to commit account", e))?;

        Ok(account)
    }

    async fn clear_expired_codes(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let query = r#"
            UPDATE accounts SET
                verification_code = NULL,
                verification_code_expiry = NULL
            WHERE verification_code_expiry IS NOT NULL
              AND verification_code_expiry <= ?
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to clear expired codes", e))?;

        Ok(result.rows_affected())
    }
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn query_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("{}: {}", context, e),
    }
}

/// MySQL reports duplicate keys as SQLSTATE 23000
fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() || db.code().as_deref() == Some("23000")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_not_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn test_query_error_is_database_error() {
        let err = query_error("Failed to update account", sqlx::Error::PoolTimedOut);
        match err {
            DomainError::Database { message } => {
                assert!(message.starts_with("Failed to update account"))
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
