//! Account entity: one record per phone number, carrying the verification
//! code state alongside the identity fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted identity record keyed by phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier carried in session claims
    pub id: Uuid,

    /// E.164 phone number, immutable once created
    pub phone_number: String,

    /// Opaque password hash, absent for code-only accounts
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Sticky once set by a successful code confirmation
    pub is_phone_verified: bool,

    /// Soft-disable flag
    pub is_active: bool,

    /// Outstanding one-time code
    #[serde(skip_serializing)]
    pub verification_code: Option<String>,

    /// Expiry of the outstanding code, present iff the code is
    pub verification_code_expiry: Option<DateTime<Utc>>,

    /// Code generations since the last reset
    pub verification_attempts: u32,

    /// Timestamp of the most recent code generation
    pub last_verification_attempt: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a provisional account for an unseen phone number
    ///
    /// The record is only persisted once a code has been generated for it.
    pub fn provisional(phone_number: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_number: phone_number.into(),
            password_hash: None,
            is_phone_verified: false,
            is_active: true,
            verification_code: None,
            verification_code_expiry: None,
            verification_attempts: 0,
            last_verification_attempt: None,
            created_at: now,
            last_login_at: None,
        }
    }

    /// Creates an account registered with a password
    pub fn with_password(
        phone_number: impl Into<String>,
        password_hash: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            password_hash: Some(password_hash.into()),
            ..Self::provisional(phone_number, now)
        }
    }

    /// Whether a code is currently stored (expired or not)
    pub fn has_outstanding_code(&self) -> bool {
        self.verification_code.is_some() && self.verification_code_expiry.is_some()
    }

    /// Whether the stored code has passed its expiry
    pub fn is_code_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.verification_code_expiry, Some(expiry) if now >= expiry)
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Updates the last login timestamp
    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.last_login_at = Some(now);
    }

    /// Public view without secrets
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            phone_number: self.phone_number.clone(),
            is_phone_verified: self.is_phone_verified,
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        }
    }
}

/// Account fields safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub phone_number: String,
    pub is_phone_verified: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_provisional_account() {
        let now = Utc::now();
        let account = Account::provisional("+15551230000", now);

        assert_eq!(account.phone_number, "+15551230000");
        assert!(account.is_active);
        assert!(!account.is_phone_verified);
        assert!(!account.has_password());
        assert!(!account.has_outstanding_code());
        assert_eq!(account.verification_attempts, 0);
        assert!(account.last_verification_attempt.is_none());
        assert_eq!(account.created_at, now);
    }

    #[test]
    fn test_with_password() {
        let account = Account::with_password("+15551230000", "$2b$hash", Utc::now());
        assert!(account.has_password());
    }

    #[test]
    fn test_code_expiry_is_inclusive_of_boundary() {
        let now = Utc::now();
        let mut account = Account::provisional("+15551230000", now);
        account.verification_code = Some("123456".to_string());
        account.verification_code_expiry = Some(now + Duration::minutes(2));

        assert!(!account.is_code_expired(now));
        assert!(account.is_code_expired(now + Duration::minutes(2)));
        assert!(account.is_code_expired(now + Duration::minutes(3)));
    }

    #[test]
    fn test_serialization_hides_secrets() {
        let mut account = Account::with_password("+15551230000", "$2b$hash", Utc::now());
        account.verification_code = Some("123456".to_string());

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("$2b$hash"));
        assert!(!json.contains("123456"));
    }

    #[test]
    fn test_summary() {
        let now = Utc::now();
        let mut account = Account::provisional("+15551230000", now);
        account.record_login(now);

        let summary = account.summary();
        assert_eq!(summary.id, account.id);
        assert_eq!(summary.last_login_at, Some(now));
    }
}
