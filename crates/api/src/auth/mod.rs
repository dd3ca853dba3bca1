//! Password hashing and session management.

pub mod password;
pub mod session;
