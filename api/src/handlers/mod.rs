//! Request handling helpers shared by routes and middleware

pub mod error;
