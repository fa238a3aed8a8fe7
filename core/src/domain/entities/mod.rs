//! Domain entities representing core business objects.

pub mod account;
pub mod session;

// Re-export commonly used types
pub use account::{Account, AccountSummary};
pub use session::{IssuedSession, SessionClaims};
