//! Verification code configuration

use serde::{Deserialize, Serialize};

/// One-time code settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Lifetime of an issued code in milliseconds
    #[serde(default = "default_code_ttl_ms")]
    pub code_ttl_ms: i64,

    /// Interval between expired-code sweeps in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// Echo issued codes back to the caller instead of only sending them
    #[serde(default)]
    pub mock_mode: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_ms: default_code_ttl_ms(),
            sweep_interval_seconds: default_sweep_interval(),
            mock_mode: false,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_ttl_ms: std::env::var("VERIFICATION_CODE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl: &i64| *ttl > 0)
                .unwrap_or(defaults.code_ttl_ms),
            sweep_interval_seconds: std::env::var("VERIFICATION_SWEEP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval_seconds),
            mock_mode: std::env::var("SMS_MOCK_MODE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or_else(|_| {
                    std::env::var("SMS_PROVIDER")
                        .map(|p| p.eq_ignore_ascii_case("mock"))
                        .unwrap_or(true)
                }),
        }
    }
}

fn default_code_ttl_ms() -> i64 {
    120_000
}

fn default_sweep_interval() -> u64 {
    60
}
