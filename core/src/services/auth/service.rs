//! Main account service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;

use pv_shared::phone::{mask_phone_number, parse_e164};

use crate::domain::entities::account::Account;
use crate::domain::entities::session::{IssuedSession, SessionClaims};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::clock::Clock;
use crate::services::session::SessionIssuer;
use crate::services::verification::{self, IssuedCode, MAX_CODE_REQUESTS};

use super::config::AuthServiceConfig;
use super::traits::{MessageTransport, PasswordHasher};
use super::types::{AuthenticatedAccount, RequestCodeResult, SessionGrant};

/// Account service tying the code lifecycle to sessions
///
/// Every operation re-reads the account immediately before computing the
/// next state, then persists it explicitly.
pub struct AuthService<R, T, H>
where
    R: AccountRepository + ?Sized,
    T: MessageTransport + ?Sized,
    H: PasswordHasher + ?Sized,
{
    /// Credential store
    accounts: Arc<R>,
    /// Message transport for codes
    transport: Arc<T>,
    hasher: Arc<H>,
    sessions: SessionIssuer,
    clock: Arc<dyn Clock>,
    config: AuthServiceConfig,
}

impl<R, T, H> AuthService<R, T, H>
where
    R: AccountRepository + ?Sized,
    T: MessageTransport + ?Sized,
    H: PasswordHasher + ?Sized,
{
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `accounts` - Repository for account persistence
    /// * `transport` - Transport that delivers codes
    /// * `hasher` - Password hashing backend
    /// * `sessions` - Session issuer
    /// * `clock` - Time source for expiry and cooldowns
    /// * `config` - Service configuration
    pub fn new(
        accounts: Arc<R>,
        transport: Arc<T>,
        hasher: Arc<H>,
        sessions: SessionIssuer,
        clock: Arc<dyn Clock>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            accounts,
            transport,
            hasher,
            sessions,
            clock,
            config,
        }
    }

    /// Issue a verification code to a phone number
    ///
    /// This method:
    /// 1. Normalizes and validates the phone number
    /// 2. Loads the account, or starts a provisional one
    /// 3. Runs the admission check
    /// 4. Generates and persists a new code
    /// 5. Hands the code to the transport
    ///
    /// A transport failure is reported as `TransportFailure` but the persisted
    /// code stays valid.
    ///
    /// # Returns
    ///
    /// * `Ok(RequestCodeResult)` - Code issued and handed off
    /// * `Err(DomainError)` - Invalid phone, throttled, disabled, store or
    ///   transport failure
    pub async fn request_code(&self, phone: &str) -> DomainResult<RequestCodeResult> {
        let phone = Self::parse_phone(phone)?;
        let masked = mask_phone_number(&phone);
        let now = self.clock.now();

        // Two first requests for an unseen number race to insert; the loser
        // retries once against the stored account.
        let (issued, account) = match self.issue_code(&phone, &masked, now).await {
            Err(DomainError::Auth(AuthError::DuplicateAccount)) => {
                tracing::debug!(phone = %masked, "Provisional account already stored, retrying");
                self.issue_code(&phone, &masked, now).await?
            }
            other => other?,
        };

        tracing::info!(
            phone = %masked,
            attempts = account.verification_attempts,
            expires_at = %issued.expires_at,
            event = "otp_generated",
            "Generated new verification code"
        );

        let receipt = self
            .transport
            .send(&phone, &issued.code, self.config.verification.code_ttl())
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %masked,
                    provider = self.transport.provider_name(),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code"
                );
                DomainError::from(AuthError::TransportFailure)
            })?;

        Ok(RequestCodeResult {
            message_id: receipt.message_id,
            expires_at: issued.expires_at,
            expires_in_seconds: (issued.expires_at - now).num_seconds(),
            attempts_remaining: MAX_CODE_REQUESTS.saturating_sub(account.verification_attempts),
            mock_code: if self.config.mock_mode {
                receipt.mock_code
            } else {
                None
            },
        })
    }

    /// Load or start the account, admit, generate and persist a code
    async fn issue_code(
        &self,
        phone: &str,
        masked: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<(IssuedCode, Account)> {
        let account = match self.accounts.find_by_phone(phone).await? {
            Some(account) => account,
            None => Account::provisional(phone, now),
        };

        if !account.is_active {
            tracing::warn!(phone = %masked, event = "code_request_disabled", "Code requested for disabled account");
            return Err(AuthError::AccountDisabled.into());
        }

        let admission = verification::can_request_code(&account, now);
        if !admission.outcome.allowed {
            let minutes = admission.outcome.retry_after_minutes.unwrap_or(1);
            tracing::warn!(
                phone = %masked,
                retry_after_minutes = minutes,
                event = "rate_limit_exceeded",
                "Verification code request rate limit exceeded"
            );
            return Err(AuthError::RateLimitExceeded { minutes }.into());
        }

        let (issued, account) =
            verification::generate_code(&admission.account, now, self.config.verification.code_ttl())
                .into_parts();
        let account = self.accounts.save(account).await?;

        Ok((issued, account))
    }

    /// Confirm a code and issue a verified session
    ///
    /// # Returns
    ///
    /// * `Ok(SessionGrant)` - Phone verified, session issued
    /// * `Err(DomainError::Auth(NoCodeIssued | CodeExpired | CodeMismatch))` -
    ///   Verification failed; nothing was persisted
    pub async fn confirm_code(&self, phone: &str, code: &str) -> DomainResult<SessionGrant> {
        let phone = Self::parse_phone(phone)?;
        let masked = mask_phone_number(&phone);
        let now = self.clock.now();

        let account = self
            .accounts
            .find_by_phone(&phone)
            .await?
            .ok_or(AuthError::NoCodeIssued)?;

        if !account.is_active {
            return Err(AuthError::AccountDisabled.into());
        }

        let (outcome, mut account) = verification::verify_code(&account, code, now).into_parts();
        if let Err(failure) = outcome {
            tracing::warn!(
                phone = %masked,
                reason = %failure,
                event = "otp_verification_failed",
                "Verification code rejected"
            );
            return Err(AuthError::from(failure).into());
        }

        account.record_login(now);
        let account = self.accounts.save(account).await?;

        tracing::info!(
            phone = %masked,
            account_id = %account.id,
            event = "otp_verified_success",
            "Verification code successfully verified"
        );

        self.grant(&account)
    }

    /// Register a password for a phone number
    ///
    /// Attaches the password to a provisional account created by an earlier
    /// code request, or creates a new account. The session is not verified
    /// until a code is confirmed.
    pub async fn register(&self, phone: &str, password: &str) -> DomainResult<SessionGrant> {
        let phone = Self::parse_phone(phone)?;
        self.validate_password(password)?;
        let now = self.clock.now();

        let existing = self.accounts.find_by_phone(&phone).await?;
        if let Some(account) = &existing {
            if account.has_password() {
                return Err(AuthError::DuplicateAccount.into());
            }
            if !account.is_active {
                return Err(AuthError::AccountDisabled.into());
            }
        }

        let hash = self.hasher.hash(password)?;
        let mut account = match existing {
            Some(mut account) => {
                account.password_hash = Some(hash);
                account
            }
            None => Account::with_password(phone.as_str(), hash, now),
        };
        account.record_login(now);
        let account = self.accounts.save(account).await?;

        tracing::info!(
            phone = %mask_phone_number(&phone),
            account_id = %account.id,
            event = "account_registered",
            "Registered account"
        );

        self.grant(&account)
    }

    /// Log in with phone number and password
    ///
    /// An unknown number and a wrong password fail identically.
    pub async fn login(&self, phone: &str, password: &str) -> DomainResult<SessionGrant> {
        let phone = Self::parse_phone(phone)?;
        let now = self.clock.now();

        let account = self
            .accounts
            .find_by_phone(&phone)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = account
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;
        if !self.hasher.verify(password, hash)? {
            tracing::warn!(
                phone = %mask_phone_number(&phone),
                event = "login_failed",
                "Password login rejected"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if !account.is_active {
            return Err(AuthError::AccountDisabled.into());
        }

        let mut account = account;
        account.record_login(now);
        let account = self.accounts.save(account).await?;

        self.grant(&account)
    }

    /// Verify a session credential and load the account it names
    ///
    /// # Returns
    ///
    /// * `Ok(AuthenticatedAccount)` - Valid credential, account active
    /// * `Err(DomainError::Token(_))` - Expired, malformed or invalid credential
    /// * `Err(DomainError::Auth(AccountNotFound | AccountDisabled))`
    pub async fn authenticate(&self, token: &str) -> DomainResult<AuthenticatedAccount> {
        let claims = self.sessions.verify(token, self.clock.now())?;
        let account_id = claims.account_id()?;

        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !account.is_active {
            return Err(AuthError::AccountDisabled.into());
        }

        Ok(AuthenticatedAccount { account, claims })
    }

    /// Reissue a credential nearing expiry with the account's current state
    pub fn refresh_if_needed(&self, claims: &SessionClaims, account: &Account) -> Option<IssuedSession> {
        self.sessions.maybe_refresh(claims, account, self.clock.now())
    }

    fn grant(&self, account: &Account) -> DomainResult<SessionGrant> {
        let session = self.sessions.issue(account, self.clock.now())?;
        Ok(SessionGrant {
            token: session.token,
            expires_at: session.expires_at,
            account: account.summary(),
        })
    }

    fn parse_phone(phone: &str) -> DomainResult<String> {
        parse_e164(phone).ok_or_else(|| {
            AuthError::InvalidPhoneFormat {
                phone: phone.to_string(),
            }
            .into()
        })
    }

    fn validate_password(&self, password: &str) -> DomainResult<()> {
        let len = password.len();
        if len < self.config.min_password_length || len > self.config.max_password_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be between {} and {} characters",
                    self.config.min_password_length, self.config.max_password_length
                ),
            });
        }
        Ok(())
    }
}
