//! Background sweep of expired verification codes
//!
//! Verification checks expiry on its own, so the sweep is hygiene only: it
//! keeps stale codes from lingering in the store.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::repositories::AccountRepository;
use crate::services::clock::Clock;

/// Configuration for the verification sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the sweep at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

/// Periodically clears expired codes from the account store
pub struct VerificationSweeper<R: AccountRepository + ?Sized + 'static> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    config: SweeperConfig,
}

impl<R: AccountRepository + ?Sized + 'static> VerificationSweeper<R> {
    /// Create a new verification sweeper
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>, config: SweeperConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Run a single sweep
    ///
    /// Store failures are recorded in the result rather than returned.
    pub async fn run_once(&self) -> SweepResult {
        if !self.config.enabled {
            return SweepResult::default();
        }

        let now = self.clock.now();
        match self.repository.clear_expired_codes(now).await {
            Ok(count) => {
                if count > 0 {
                    info!(cleared = count, event = "codes_swept", "Cleared expired verification codes");
                }
                SweepResult {
                    codes_cleared: count,
                    errors: Vec::new(),
                }
            }
            Err(e) => {
                error!(error = %e, event = "code_sweep_failed", "Failed to sweep expired codes");
                SweepResult {
                    codes_cleared: 0,
                    errors: vec![format!("Code sweep error: {}", e)],
                }
            }
        }
    }

    /// Start the sweeper as a background task
    ///
    /// # Returns
    /// * `Some(JoinHandle)` - Handle to the spawned loop
    /// * `None` - Sweeping is disabled
    pub fn spawn(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Verification sweeper is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Verification sweeper started"
            );

            let mut timer = tokio::time::interval(interval);
            loop {
                timer.tick().await;
                let result = self.run_once().await;
                if !result.is_success() {
                    warn!("Sweep completed with errors: {:?}", result.errors);
                }
            }
        }))
    }
}

/// Result of a sweep
#[derive(Debug, Default)]
pub struct SweepResult {
    /// Number of accounts whose expired code was cleared
    pub codes_cleared: u64,
    /// Any errors encountered during the sweep
    pub errors: Vec<String>,
}

impl SweepResult {
    /// Check if the sweep was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
