//! Session issuance
//!
//! Signs time-bounded credentials from an account snapshot, verifies them,
//! and decides when a credential close to expiry should be reissued.

mod codec;
mod config;
mod issuer;

#[cfg(test)]
mod tests;

pub use codec::{JwtCodec, TokenCodec};
pub use config::SessionConfig;
pub use issuer::SessionIssuer;
