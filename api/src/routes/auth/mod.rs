//! Authentication route handlers
//!
//! - Phone verification (requesting and confirming codes)
//! - Password registration and login
//! - The current session

pub mod confirm_code;
pub mod login;
pub mod me;
pub mod register;
pub mod request_code;
