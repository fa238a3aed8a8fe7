//! # Infrastructure Layer
//!
//! Concrete implementations of the traits defined in `pv_core`:
//!
//! - **Database**: MySQL credential store using SQLx
//! - **SMS**: Mock and Twilio message transports
//! - **Cache**: Redis-backed request counters
//! - **Security**: bcrypt password hashing

use pv_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// SMS module - Message transports
pub mod sms;

/// Cache module - Redis client and request counters
pub mod cache;

/// Security module - Password hashing
pub mod security;

pub use cache::{RedisClient, RedisRequestCounter};
pub use database::{DatabasePool, MySqlAccountRepository};
pub use security::BcryptPasswordHasher;
pub use sms::{create_transport, MockTransport, TwilioConfig, TwilioTransport};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Database(e) => DomainError::Database {
                message: e.to_string(),
            },
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
