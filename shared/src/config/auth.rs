//! Session signing configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Process-wide HMAC secret for signing sessions
    pub secret: String,

    /// Session lifetime in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: i64,

    /// Remaining lifetime below which a session is reissued
    #[serde(default = "default_refresh_threshold")]
    pub refresh_threshold_seconds: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            session_ttl_seconds: default_session_ttl(),
            refresh_threshold_seconds: default_refresh_threshold(),
            issuer: String::from("phone-verify"),
            audience: String::from("phone-verify-clients"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.secret),
            session_ttl_seconds: std::env::var("SESSION_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.session_ttl_seconds),
            refresh_threshold_seconds: std::env::var("SESSION_REFRESH_THRESHOLD_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_threshold_seconds),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
        }
    }

    /// Set session lifetime in days
    pub fn with_session_ttl_days(mut self, days: i64) -> Self {
        self.session_ttl_seconds = days * 86400;
        self
    }

    /// Set the refresh threshold in seconds
    pub fn with_refresh_threshold(mut self, seconds: i64) -> Self {
        self.refresh_threshold_seconds = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

fn default_session_ttl() -> i64 {
    604800 // 7 days
}

fn default_refresh_threshold() -> i64 {
    3600 // 1 hour
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = JwtConfig::default();
        assert_eq!(config.session_ttl_seconds, 7 * 24 * 3600);
        assert_eq!(config.refresh_threshold_seconds, 3600);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_builder() {
        let config = JwtConfig::new("another-secret")
            .with_session_ttl_days(1)
            .with_refresh_threshold(60);
        assert!(!config.is_using_default_secret());
        assert_eq!(config.session_ttl_seconds, 86400);
        assert_eq!(config.refresh_threshold_seconds, 60);
    }
}
