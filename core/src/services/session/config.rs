//! Configuration for the session issuer

use chrono::Duration;
use pv_shared::JwtConfig;

/// Session lifetime policy
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Credential lifetime in seconds
    pub ttl_seconds: i64,
    /// Reissue when less than this many seconds remain
    pub refresh_threshold_seconds: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.ttl_seconds)
    }

    pub fn refresh_threshold(&self) -> Duration {
        Duration::seconds(self.refresh_threshold_seconds)
    }
}

impl From<&JwtConfig> for SessionConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            ttl_seconds: config.session_ttl_seconds,
            refresh_threshold_seconds: config.refresh_threshold_seconds,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}
