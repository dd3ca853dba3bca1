//! Row types as read from PostgreSQL.
//!
//! Status columns hold text labels, so rows are decoded into these
//! structs first and converted into the core entities afterwards.

pub mod edit_request;
pub mod user;
pub mod video;
