//! Actix middleware for the auth scope

pub mod rate_limit;
pub mod session;

pub use rate_limit::IpRateLimiter;
pub use session::{SessionAuth, SessionContext, REFRESHED_TOKEN_HEADER};
