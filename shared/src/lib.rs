//! Shared utilities and common types for the phone verification server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Phone number utilities
//! - The API response envelope

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CounterBackend, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    RateLimitConfig, ServerConfig, SmsConfig, SmsProvider, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::ApiResponse;
pub use utils::phone;
