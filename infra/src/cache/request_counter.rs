//! Redis-backed fixed-window request counter

use async_trait::async_trait;
use std::time::Duration;

use pv_core::errors::{DomainError, DomainResult};
use pv_core::services::{CounterSnapshot, RequestCounter};

use super::redis_client::RedisClient;

/// Increment the key, open the window on the first hit, report the TTL
const HIT_SCRIPT: &str = r#"
local count = redis.call('INCR', KEYS[1])
if count == 1 or redis.call('PTTL', KEYS[1]) < 0 then
    redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
return {count, redis.call('PTTL', KEYS[1])}
"#;

/// Request counter shared across server instances through Redis
///
/// Each key is a Redis integer that expires when its window closes, so
/// eviction is left to Redis.
pub struct RedisRequestCounter {
    redis_client: RedisClient,
    script: redis::Script,
    key_prefix: String,
}

impl RedisRequestCounter {
    pub fn new(redis_client: RedisClient) -> Self {
        Self::with_prefix(redis_client, "rate_limit")
    }

    /// Use a custom key namespace
    pub fn with_prefix(redis_client: RedisClient, prefix: impl Into<String>) -> Self {
        Self {
            redis_client,
            script: redis::Script::new(HIT_SCRIPT),
            key_prefix: prefix.into(),
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

#[async_trait]
impl RequestCounter for RedisRequestCounter {
    async fn hit(&self, key: &str, window: Duration) -> DomainResult<CounterSnapshot> {
        let mut conn = self.redis_client.get_connection();
        let window_ms = window.as_millis().max(1) as u64;

        let (count, ttl_ms): (u64, i64) = self
            .script
            .key(self.key(key))
            .arg(window_ms)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update rate limit: {}", e),
            })?;

        Ok(CounterSnapshot {
            count,
            resets_in: Duration::from_millis(ttl_ms.max(0) as u64),
        })
    }

    async fn evict_expired(&self) -> DomainResult<usize> {
        Ok(0)
    }
}

