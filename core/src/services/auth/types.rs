//! Types for account service results

use chrono::{DateTime, Utc};

use crate::domain::entities::account::{Account, AccountSummary};
use crate::domain::entities::session::SessionClaims;

/// Result of requesting a verification code
#[derive(Debug, Clone)]
pub struct RequestCodeResult {
    /// The transport message ID
    pub message_id: String,
    /// When the issued code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Code lifetime in seconds
    pub expires_in_seconds: i64,
    /// Requests left before the cooldown applies
    pub attempts_remaining: u32,
    /// The code, only in mock mode
    pub mock_code: Option<String>,
}

/// A signed session handed to the client
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub account: AccountSummary,
}

/// A verified credential together with the freshly loaded account
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account: Account,
    pub claims: SessionClaims,
}
