//! Security module - Password hashing

pub mod password;

pub use password::BcryptPasswordHasher;
