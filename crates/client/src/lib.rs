//! REST client for the external edit service.
//!
//! The edit service exposes two JSON endpoints: one that turns a prompt
//! into an [`EditPlan`](promptcut_core::edit_plan::EditPlan) and one that
//! applies a plan to a video. This crate provides the wire types, an
//! HTTP client over [`reqwest`], and the [`PlanRequester`] /
//! [`VideoProcessor`] traits the workflow is written against.

pub mod api;
pub mod config;
pub mod messages;
pub mod transport;

pub use api::{EditServiceApi, EditServiceError};
pub use config::EditServiceConfig;
pub use transport::{PlanRequester, VideoProcessor};
