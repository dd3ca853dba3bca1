use std::sync::Arc;

use promptcut_core::repository::{EditRequestStore, UserRepository, VideoRepository};
use promptcut_events::EventBus;
use promptcut_pipeline::EditWorkflow;
use tokio_util::sync::CancellationToken;

use crate::auth::session::SessionStore;
use crate::config::ServerConfig;
use crate::prompts::PromptLog;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Present when running against PostgreSQL; used by the health check.
    pub pool: Option<promptcut_db::DbPool>,
    pub users: Arc<dyn UserRepository>,
    pub videos: Arc<dyn VideoRepository>,
    pub edit_requests: Arc<dyn EditRequestStore>,
    pub sessions: Arc<SessionStore>,
    pub prompts: Arc<PromptLog>,
    pub workflow: Arc<EditWorkflow>,
    /// Event bus the workflow and handlers publish to; `/events` streams it.
    pub event_bus: Arc<EventBus>,
    /// Cancelled when the server starts shutting down. Ends open event streams.
    pub shutdown: CancellationToken,
}
