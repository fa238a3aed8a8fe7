//! Configuration for the account service

use pv_shared::VerificationConfig;

use crate::services::verification::VerificationPolicy;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Code lifetime policy
    pub verification: VerificationPolicy,
    /// Return issued codes to the caller (non-production only)
    pub mock_mode: bool,
    /// Minimum accepted password length
    pub min_password_length: usize,
    /// Maximum accepted password length
    pub max_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            verification: VerificationPolicy::default(),
            mock_mode: false,
            min_password_length: 8,
            // bcrypt ignores input past 72 bytes
            max_password_length: 72,
        }
    }
}

impl From<&VerificationConfig> for AuthServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            verification: VerificationPolicy::from(config),
            mock_mode: config.mock_mode,
            ..Default::default()
        }
    }
}
