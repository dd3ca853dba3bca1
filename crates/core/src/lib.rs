//! Domain model for the prompt-driven video editing workflow.
//!
//! Holds the entities (videos, users, sessions, edit requests and edit
//! plans), the edit-request status machine, prompt validation, the
//! catalogue of transient user notices, and the repository traits that
//! storage backends implement. Nothing in this crate performs I/O.

pub mod edit_plan;
pub mod edit_request;
pub mod error;
pub mod notice;
pub mod prompt;
pub mod repository;
pub mod session;
pub mod types;
pub mod user;
pub mod video;
