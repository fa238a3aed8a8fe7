//! Repository interfaces implemented by the infrastructure layer.

pub mod account;

pub use account::{AccountRepository, InMemoryAccountRepository};
