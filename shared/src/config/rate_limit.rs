//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Where per-IP request counts are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CounterBackend {
    /// Process-local counters
    #[default]
    Memory,
    /// Shared Redis counters
    Redis,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable per-IP request limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Max requests per IP within the window
    #[serde(default = "default_per_ip_requests")]
    pub per_ip_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_per_ip_window")]
    pub per_ip_window_seconds: u64,

    #[serde(default)]
    pub backend: CounterBackend,

    /// Redis connection URL for the shared backend
    #[serde(default)]
    pub redis_url: Option<String>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            per_ip_requests: default_per_ip_requests(),
            per_ip_window_seconds: default_per_ip_window(),
            backend: CounterBackend::Memory,
            redis_url: None,
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let redis_url = std::env::var("REDIS_URL").ok().filter(|u| !u.is_empty());
        let backend = if redis_url.is_some() {
            CounterBackend::Redis
        } else {
            CounterBackend::Memory
        };

        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            per_ip_requests: std::env::var("RATE_LIMIT_PER_IP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.per_ip_requests),
            per_ip_window_seconds: std::env::var("RATE_LIMIT_WINDOW_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.per_ip_window_seconds),
            backend,
            redis_url,
        }
    }

    /// Relaxed limits for local development
    pub fn development() -> Self {
        Self {
            per_ip_requests: 1000,
            ..Default::default()
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_per_ip_requests() -> u32 {
    60
}

fn default_per_ip_window() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.per_ip_requests, 60);
        assert_eq!(config.per_ip_window_seconds, 60);
        assert_eq!(config.backend, CounterBackend::Memory);
    }

    #[test]
    fn test_development_is_relaxed() {
        assert!(RateLimitConfig::development().per_ip_requests > RateLimitConfig::default().per_ip_requests);
    }
}
