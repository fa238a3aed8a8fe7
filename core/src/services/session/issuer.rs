//! Session issuer implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::account::Account;
use crate::domain::entities::session::{IssuedSession, SessionClaims};
use crate::errors::TokenError;
use pv_shared::phone::mask_phone_number;

use super::codec::TokenCodec;
use super::config::SessionConfig;

/// Produces and checks signed session credentials
#[derive(Clone)]
pub struct SessionIssuer {
    codec: Arc<dyn TokenCodec>,
    config: SessionConfig,
}

impl SessionIssuer {
    /// Creates a new session issuer
    ///
    /// # Arguments
    ///
    /// * `codec` - Signing backend
    /// * `config` - Lifetime and claim settings
    pub fn new(codec: Arc<dyn TokenCodec>, config: SessionConfig) -> Self {
        Self { codec, config }
    }

    /// Issue a credential from an account snapshot
    ///
    /// The claims reflect the account at `now` and are never refreshed from
    /// the store afterwards.
    pub fn issue(&self, account: &Account, now: DateTime<Utc>) -> Result<IssuedSession, TokenError> {
        let claims = SessionClaims::for_account(
            account,
            now,
            self.config.ttl(),
            &self.config.issuer,
            &self.config.audience,
        );
        let token = self.codec.sign(&claims)?;
        let expires_at = claims.expires_at();

        tracing::debug!(
            account_id = %account.id,
            phone = %mask_phone_number(&account.phone_number),
            is_phone_verified = account.is_phone_verified,
            event = "session_issued",
            "Issued session credential"
        );

        Ok(IssuedSession {
            token,
            claims,
            expires_at,
        })
    }

    /// Reissue a credential that is close to expiry
    ///
    /// # Returns
    /// * `Some(IssuedSession)` - Remaining lifetime was below the threshold;
    ///   the new credential carries the current account state
    /// * `None` - No refresh needed, or signing failed (logged, not an error)
    pub fn maybe_refresh(
        &self,
        claims: &SessionClaims,
        account: &Account,
        now: DateTime<Utc>,
    ) -> Option<IssuedSession> {
        if claims.remaining(now) >= self.config.refresh_threshold() {
            return None;
        }

        match self.issue(account, now) {
            Ok(session) => {
                tracing::info!(
                    account_id = %account.id,
                    event = "session_refreshed",
                    "Reissued session nearing expiry"
                );
                Some(session)
            }
            Err(e) => {
                tracing::warn!(
                    account_id = %account.id,
                    error = %e,
                    event = "session_refresh_failed",
                    "Failed to refresh session"
                );
                None
            }
        }
    }

    /// Decode a credential and check its signature and expiry
    ///
    /// A valid credential does not prove the account still exists or is
    /// active; callers re-fetch the account.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        self.codec.verify(token, now)
    }
}
