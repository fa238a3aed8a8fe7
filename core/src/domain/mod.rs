//! Domain layer containing the account record and session claims.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{Account, AccountSummary, IssuedSession, SessionClaims};
