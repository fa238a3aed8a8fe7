//! Integration tests for the Redis request counter
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p pv_infra --test redis_counter_integration -- --ignored

use std::time::Duration;

use pv_core::services::RequestCounter;
use pv_infra::cache::{RedisClient, RedisRequestCounter};
use uuid::Uuid;

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = RedisClient::new(&redis_url()).await.unwrap();
    assert!(client.health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_hits_count_within_window() {
    let client = RedisClient::new(&redis_url()).await.unwrap();
    let counter = RedisRequestCounter::with_prefix(client, "test_rate_limit");
    let key = format!("ip:{}", Uuid::new_v4());

    let first = counter.hit(&key, Duration::from_secs(60)).await.unwrap();
    let second = counter.hit(&key, Duration::from_secs(60)).await.unwrap();

    assert_eq!(first.count, 1);
    assert_eq!(second.count, 2);
    assert!(second.resets_in <= Duration::from_secs(60));
    assert!(second.resets_in > Duration::ZERO);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_window_expires() {
    let client = RedisClient::new(&redis_url()).await.unwrap();
    let counter = RedisRequestCounter::with_prefix(client, "test_rate_limit");
    let key = format!("ip:{}", Uuid::new_v4());

    counter.hit(&key, Duration::from_millis(200)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;

    let snapshot = counter.hit(&key, Duration::from_millis(200)).await.unwrap();
    assert_eq!(snapshot.count, 1);
}
