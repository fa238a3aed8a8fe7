//! Request counter trait

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainResult;

/// Count observed for a key after a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Hits inside the current window, including this one
    pub count: u64,
    /// Time until the window closes and the count starts over
    pub resets_in: Duration,
}

impl CounterSnapshot {
    /// Whether the count has gone past `limit`
    pub fn exceeds(&self, limit: u64) -> bool {
        self.count > limit
    }
}

/// Fixed-window counter keyed by an arbitrary caller identifier
#[async_trait]
pub trait RequestCounter: Send + Sync {
    /// Record a hit for `key`
    ///
    /// The first hit for a key opens a window of length `window`; later hits
    /// inside it increment the count.
    async fn hit(&self, key: &str, window: Duration) -> DomainResult<CounterSnapshot>;

    /// Drop entries whose window has closed
    ///
    /// # Returns
    /// * `Ok(count)` - Number of entries removed
    async fn evict_expired(&self) -> DomainResult<usize>;
}
