//! Request and response bodies for the auth endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use pv_core::domain::AccountSummary;
use pv_core::services::{RequestCodeResult, SessionGrant};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestCodeRequest {
    /// Phone number in E.164 form; spaces, dashes and parentheses are ignored
    /// Examples: "+15551230000", "+1 (555) 123-0000"
    #[validate(length(min = 2, max = 32))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCodeResponse {
    pub message: String,
    /// Seconds until the issued code expires
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
    /// Code requests left before the cooldown applies
    pub attempts_remaining: u32,
    /// The code itself, only in mock mode
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code: Option<String>,
}

impl From<RequestCodeResult> for RequestCodeResponse {
    fn from(result: RequestCodeResult) -> Self {
        Self {
            message: "Verification code sent".to_string(),
            expires_in: result.expires_in_seconds,
            expires_at: result.expires_at,
            attempts_remaining: result.attempts_remaining,
            code: result.mock_code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmCodeRequest {
    #[validate(length(min = 2, max = 32))]
    pub phone: String,

    /// 6-digit verification code; other lengths are reported by verification
    #[validate(length(max = 16))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32))]
    pub phone: String,

    #[validate(length(min = 8, max = 72))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 2, max = 32))]
    pub phone: String,

    #[validate(length(min = 1, max = 72))]
    pub password: String,
}

/// Issued session returned by confirm, register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub account: AccountSummary,
}

impl From<SessionGrant> for SessionResponse {
    fn from(grant: SessionGrant) -> Self {
        Self {
            token: grant.token,
            token_type: "Bearer".to_string(),
            expires_at: grant.expires_at,
            account: grant.account,
        }
    }
}

/// Current account plus what the presented credential claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub account: AccountSummary,
    /// Verification state as recorded in the credential, which may lag
    /// behind the account
    pub session_phone_verified: bool,
    pub session_expires_at: DateTime<Utc>,
}
