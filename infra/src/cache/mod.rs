//! Cache module for Redis-backed state
//!
//! Holds the Redis connection wrapper and the request counter used by the
//! per-IP limiter when several server instances share counts.

pub mod redis_client;
pub mod request_counter;

pub use redis_client::RedisClient;
pub use request_counter::RedisRequestCounter;
