//! Account service module
//!
//! Orchestrates the verification state machine, the credential store, the
//! message transport and the session issuer:
//! - Code requests with attempt throttling
//! - Code confirmation and session issuance
//! - Password registration and login
//! - Session authentication and refresh

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
pub use traits::{DeliveryReceipt, MessageTransport, PasswordHasher, TransportError};
pub use types::{AuthenticatedAccount, RequestCodeResult, SessionGrant};
