//! bcrypt implementation of `PasswordHasher`

use pv_core::errors::{DomainError, DomainResult};
use pv_core::services::PasswordHasher;

// bcrypt keeps its cost bounds private; these mirror bcrypt 0.15 (MIN_COST/MAX_COST)
const BCRYPT_MIN_COST: u32 = 4;
const BCRYPT_MAX_COST: u32 = 31;

/// Password hasher using bcrypt
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given work factor (4..=31)
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(BCRYPT_MIN_COST, BCRYPT_MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        match bcrypt::verify(password, hash) {
            Ok(matches) => Ok(matches),
            // A stored value that is not a bcrypt hash can never match
            Err(bcrypt::BcryptError::InvalidHash(_)) | Err(bcrypt::BcryptError::InvalidPrefix(_)) => {
                tracing::warn!("Stored password hash is not a valid bcrypt hash");
                Ok(false)
            }
            Err(e) => Err(DomainError::Internal {
                message: format!("Failed to verify password: {}", e),
            }),
        }
    }
}
