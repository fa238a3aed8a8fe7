//! Configuration for the verification state machine

use chrono::Duration;
use pv_shared::VerificationConfig;

use super::machine::DEFAULT_CODE_TTL_MS;

/// Tunable part of the code lifecycle
///
/// The attempt cap and cooldown window are fixed constants; only the code
/// lifetime is configurable.
#[derive(Debug, Clone, Copy)]
pub struct VerificationPolicy {
    /// Lifetime of a generated code in milliseconds
    pub code_ttl_ms: i64,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            code_ttl_ms: DEFAULT_CODE_TTL_MS,
        }
    }
}

impl VerificationPolicy {
    pub fn code_ttl(&self) -> Duration {
        Duration::milliseconds(self.code_ttl_ms)
    }
}

impl From<&VerificationConfig> for VerificationPolicy {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_ttl_ms: config.code_ttl_ms,
        }
    }
}
