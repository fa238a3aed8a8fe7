//! # Phone Verify Core
//!
//! Domain layer for the phone verification backend: the account entity, the
//! one-time code state machine, session issuance, and the traits that
//! infrastructure implements (credential store, message transport, password
//! hashing, request counters).

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
