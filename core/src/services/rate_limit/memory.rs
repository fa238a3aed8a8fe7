//! Process-local request counter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::errors::DomainResult;
use crate::services::clock::{Clock, SystemClock};

use super::counter::{CounterSnapshot, RequestCounter};

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u64,
    closes_at: DateTime<Utc>,
}

/// Request counter held in memory for the lifetime of the process
pub struct InMemoryRequestCounter {
    windows: Arc<RwLock<HashMap<String, Window>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRequestCounter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a counter driven by the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Number of tracked keys, expired or not
    pub async fn tracked_keys(&self) -> usize {
        self.windows.read().await.len()
    }
}

impl Default for InMemoryRequestCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestCounter for InMemoryRequestCounter {
    async fn hit(&self, key: &str, window: Duration) -> DomainResult<CounterSnapshot> {
        let now = self.clock.now();
        let span = chrono::Duration::from_std(window).unwrap_or(chrono::Duration::zero());
        let mut windows = self.windows.write().await;

        let entry = windows
            .entry(key.to_string())
            .and_modify(|w| {
                if now >= w.closes_at {
                    *w = Window {
                        count: 0,
                        closes_at: now + span,
                    };
                }
            })
            .or_insert(Window {
                count: 0,
                closes_at: now + span,
            });
        entry.count += 1;

        let resets_in = (entry.closes_at - now).to_std().unwrap_or(Duration::ZERO);
        Ok(CounterSnapshot {
            count: entry.count,
            resets_in,
        })
    }

    async fn evict_expired(&self) -> DomainResult<usize> {
        let now = self.clock.now();
        let mut windows = self.windows.write().await;
        let before = windows.len();
        windows.retain(|_, w| now < w.closes_at);
        Ok(before - windows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::MockClock;

    const WINDOW: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_counts_within_window() {
        let counter = InMemoryRequestCounter::new();

        let first = counter.hit("10.0.0.1", WINDOW).await.unwrap();
        let second = counter.hit("10.0.0.1", WINDOW).await.unwrap();
        let other = counter.hit("10.0.0.2", WINDOW).await.unwrap();

        assert_eq!(first.count, 1);
        assert_eq!(second.count, 2);
        assert_eq!(other.count, 1);
        assert!(second.resets_in <= WINDOW);
    }

    #[tokio::test]
    async fn test_window_restarts_after_expiry() {
        let clock = Arc::new(MockClock::default());
        let counter = InMemoryRequestCounter::with_clock(clock.clone());

        for _ in 0..3 {
            counter.hit("10.0.0.1", WINDOW).await.unwrap();
        }
        clock.advance(chrono::Duration::seconds(61));

        let snapshot = counter.hit("10.0.0.1", WINDOW).await.unwrap();
        assert_eq!(snapshot.count, 1);
        assert_eq!(snapshot.resets_in, WINDOW);
    }

    #[tokio::test]
    async fn test_evict_expired() {
        let clock = Arc::new(MockClock::default());
        let counter = InMemoryRequestCounter::with_clock(clock.clone());

        counter.hit("10.0.0.1", WINDOW).await.unwrap();
        clock.advance(chrono::Duration::seconds(30));
        counter.hit("10.0.0.2", WINDOW).await.unwrap();
        clock.advance(chrono::Duration::seconds(31));

        assert_eq!(counter.evict_expired().await.unwrap(), 1);
        assert_eq!(counter.tracked_keys().await, 1);
    }

    #[test]
    fn test_exceeds() {
        let snapshot = CounterSnapshot {
            count: 61,
            resets_in: WINDOW,
        };
        assert!(snapshot.exceeds(60));
        assert!(!snapshot.exceeds(61));
    }
}
