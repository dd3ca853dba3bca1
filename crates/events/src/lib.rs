//! Edit lifecycle events.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`EditEvent`] -- the event envelope, optionally carrying the
//!   transient [`Notice`](promptcut_core::notice::Notice) a client shows.
//! - [`event_types`] -- the dot-separated event names in use.

pub mod bus;
pub mod event_types;

pub use bus::{EditEvent, EventBus};
