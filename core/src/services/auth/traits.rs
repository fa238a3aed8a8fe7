//! Traits for message transport and password hashing integration

use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;

use crate::errors::DomainResult;

/// Result of handing a code to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider message identifier
    pub message_id: String,
    /// The code itself, only set by mock transports
    pub mock_code: Option<String>,
}

/// Delivery failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Provider rejected message: {0}")]
    Rejected(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Transport misconfigured: {0}")]
    Configuration(String),
}

/// Sends one-time codes to phone numbers
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Send a verification code valid for `valid_for`
    ///
    /// Awaited once per request and never retried.
    async fn send(
        &self,
        phone: &str,
        code: &str,
        valid_for: Duration,
    ) -> Result<DeliveryReceipt, TransportError>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;
}

/// One-way password hashing
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> DomainResult<String>;

    /// Compare a password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}
