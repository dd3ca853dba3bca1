//! Request extractors.
//!
//! - [`auth::AuthSession`] -- resolves the caller's session from a Bearer token.

pub mod auth;
