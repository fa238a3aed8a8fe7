//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Session signing configuration
//! - `database` - Credential store connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Per-IP request limiting
//! - `server` - HTTP server configuration
//! - `sms` - Message transport selection and credentials
//! - `verification` - One-time code lifetime and sweeping

pub mod auth;
pub mod database;
pub mod environment;
pub mod rate_limit;
pub mod server;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{CounterBackend, RateLimitConfig};
pub use server::ServerConfig;
pub use sms::{SmsConfig, SmsProvider};
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub jwt: JwtConfig,

    pub verification: VerificationConfig,

    pub sms: SmsConfig,

    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            verification: VerificationConfig::default(),
            sms: SmsConfig::default(),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            verification: VerificationConfig::from_env(),
            sms: SmsConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            logging: LoggingConfig::for_environment(environment).with_env_override(),
        }
    }

    /// Check settings that must hold before serving traffic
    ///
    /// # Returns
    /// * `Err(String)` - Description of the first problem found
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.environment.is_production() && self.verification.mock_mode {
            return Err("SMS_MOCK_MODE cannot be enabled in production".to_string());
        }
        if self.sms.provider == SmsProvider::Twilio && !self.sms.has_twilio_credentials() {
            return Err("Twilio provider selected without TWILIO_* credentials".to_string());
        }
        if self.rate_limit.backend == CounterBackend::Redis && self.rate_limit.redis_url.is_none() {
            return Err("Redis rate limiting requires REDIS_URL".to_string());
        }
        if self.jwt.refresh_threshold_seconds >= self.jwt.session_ttl_seconds {
            return Err("Session refresh threshold must be shorter than the session lifetime".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_twilio_requires_credentials() {
        let mut config = AppConfig::default();
        config.sms.provider = SmsProvider::Twilio;
        assert!(config.validate().is_err());

        config.sms.account_sid = Some("AC123".to_string());
        config.sms.auth_token = Some("token".to_string());
        config.sms.from_number = Some("+15550001111".to_string());
        assert!(config.validate().is_ok());
    }
}
