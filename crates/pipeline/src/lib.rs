//! Edit request workflow.
//!
//! Ties the edit service client, the storage traits and the event bus
//! together: a submitted prompt becomes an `In Progress` edit request,
//! the plan and processing calls run in order, and the request ends in
//! `Completed` or `Error`. In-flight requests can be cancelled and every
//! external call is bounded by a timeout.

pub mod config;
pub mod error;
pub mod tracker;
pub mod workflow;

pub use config::{InFlightPolicy, WorkflowConfig};
pub use error::{WorkflowError, WorkflowStep};
pub use workflow::{EditOutcome, EditWorkflow, SubmitEdit};
