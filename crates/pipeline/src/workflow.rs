//! The submit -> plan -> process workflow for a single edit request.
//!
//! [`EditWorkflow::submit`] persists the `In Progress` record and returns
//! before any network call is made. [`EditWorkflow::run`] then performs the
//! two edit service calls strictly in order, persisting every status change
//! and publishing an [`EditEvent`] for each. The processor is only called
//! once a plan has been received.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use promptcut_client::{EditServiceError, PlanRequester, VideoProcessor};
use promptcut_core::edit_request::EditRequest;
use promptcut_core::notice::Notice;
use promptcut_core::prompt::{validate_prompt, PromptEntry};
use promptcut_core::repository::{EditRequestStore, VideoRepository};
use promptcut_events::{event_types, EditEvent, EventBus};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::WorkflowConfig;
use crate::error::{WorkflowError, WorkflowStep};
use crate::tracker::InFlightTracker;

/// How long [`EditWorkflow::shutdown`] waits for cancelled tasks to record
/// their final status.
const SHUTDOWN_DRAIN: Duration = Duration::from_secs(5);

/// Everything needed to start an edit.
#[derive(Debug, Clone)]
pub struct SubmitEdit {
    pub video_id: String,
    pub user_id: String,
    pub prompt: String,
    /// The file the processor should apply the plan to.
    pub video_uri: String,
    /// Earlier prompts for this video, oldest first.
    pub history: Vec<PromptEntry>,
}

/// Final state of one edit request.
#[derive(Debug)]
pub struct EditOutcome {
    /// The request as last persisted.
    pub edit_request: EditRequest,
    pub processed_video_url: Option<String>,
    /// Set when the request ended in `Error`. Not persisted.
    pub failure: Option<WorkflowError>,
}

impl EditOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

pub struct EditWorkflow {
    planner: Arc<dyn PlanRequester>,
    processor: Arc<dyn VideoProcessor>,
    requests: Arc<dyn EditRequestStore>,
    videos: Arc<dyn VideoRepository>,
    events: Arc<EventBus>,
    config: WorkflowConfig,
    tracker: InFlightTracker,
    tasks: TaskTracker,
}

impl EditWorkflow {
    pub fn new(
        planner: Arc<dyn PlanRequester>,
        processor: Arc<dyn VideoProcessor>,
        requests: Arc<dyn EditRequestStore>,
        videos: Arc<dyn VideoRepository>,
        events: Arc<EventBus>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            planner,
            processor,
            requests,
            videos,
            events,
            config,
            tracker: InFlightTracker::new(),
            tasks: TaskTracker::new(),
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Validate the prompt, persist an `In Progress` request and register
    /// it as in flight.
    pub async fn submit(&self, input: &SubmitEdit) -> Result<EditRequest, WorkflowError> {
        let prompt = validate_prompt(&input.prompt)?;
        let request = EditRequest::new(input.video_id.as_str(), input.user_id.as_str(), prompt);

        self.tracker
            .register(&request.id, &request.video_id, self.config.policy)
            .await?;

        if let Err(e) = self.requests.insert(&request).await {
            self.tracker.release(&request.id).await;
            return Err(e.into());
        }

        tracing::info!(
            edit_request_id = %request.id,
            video_id = %request.video_id,
            user_id = %request.user_id,
            "Edit request submitted",
        );

        self.events.publish(
            EditEvent::for_request(event_types::EDIT_SUBMITTED, &request)
                .with_notice(Notice::processing()),
        );

        Ok(request)
    }

    /// Submit and run to completion.
    pub async fn execute(&self, input: SubmitEdit) -> Result<EditOutcome, WorkflowError> {
        let request = self.submit(&input).await?;
        Ok(self.run(request, input.video_uri, input.history).await)
    }

    /// Submit, then run on a background task. Returns the `In Progress`
    /// record as soon as it is stored.
    pub async fn spawn(self: &Arc<Self>, input: SubmitEdit) -> Result<EditRequest, WorkflowError> {
        let request = self.submit(&input).await?;

        let this = Arc::clone(self);
        let running = request.clone();
        self.tasks.spawn(async move {
            this.run(running, input.video_uri, input.history).await;
        });

        Ok(request)
    }

    /// Drive a submitted request through planning and processing.
    pub async fn run(
        &self,
        mut request: EditRequest,
        video_uri: String,
        history: Vec<PromptEntry>,
    ) -> EditOutcome {
        let cancel = match self.tracker.token(&request.id).await {
            Some(token) => token,
            None => self.tracker.detached_token(),
        };

        let result = self
            .drive(&mut request, &video_uri, &history, &cancel)
            .await;

        // The request stays registered until its terminal status is stored.
        let outcome = match result {
            Ok(url) => EditOutcome {
                edit_request: request,
                processed_video_url: Some(url),
                failure: None,
            },
            Err(err) => {
                self.record_failure(&mut request, &err).await;
                EditOutcome {
                    edit_request: request,
                    processed_video_url: None,
                    failure: Some(err),
                }
            }
        };
        self.tracker.release(&outcome.edit_request.id).await;
        outcome
    }

    /// Cancel a running request. Returns `false` if it is not running.
    pub async fn cancel(&self, edit_id: &str) -> bool {
        let cancelled = self.tracker.cancel(edit_id).await;
        if cancelled {
            tracing::info!(edit_request_id = %edit_id, "Edit request cancellation requested");
        }
        cancelled
    }

    /// Ids of the requests currently running against `video_id`.
    pub async fn in_flight(&self, video_id: &str) -> Vec<String> {
        self.tracker.in_flight(video_id).await
    }

    /// Cancel every running request and wait briefly for them to settle.
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down edit workflow");
        self.tracker.cancel_all();
        self.tasks.close();

        if tokio::time::timeout(SHUTDOWN_DRAIN, self.tasks.wait()).await.is_err() {
            tracing::warn!(
                remaining = self.tracker.len().await,
                "Edit workflow shutdown timed out with requests still running",
            );
        }
    }

    // ---- private helpers ----

    async fn drive(
        &self,
        request: &mut EditRequest,
        video_uri: &str,
        history: &[PromptEntry],
        cancel: &CancellationToken,
    ) -> Result<String, WorkflowError> {
        let plan = guarded(
            WorkflowStep::Plan,
            self.config.plan_timeout,
            cancel,
            self.planner
                .request_plan(&request.prompt_text, &request.video_id, history, &request.id),
        )
        .await?;

        request.record_plan(&plan)?;
        self.requests.update(request).await?;

        tracing::info!(
            edit_request_id = %request.id,
            effects = plan.effects.len(),
            "Edit plan received",
        );
        self.events.publish(
            EditEvent::for_request(event_types::EDIT_PLAN_RECEIVED, request)
                .with_payload(serde_json::json!({ "effect_count": plan.effects.len() })),
        );

        let url = guarded(
            WorkflowStep::Process,
            self.config.process_timeout,
            cancel,
            self.processor.process(video_uri, &plan, &request.id),
        )
        .await?;

        // A cancel that landed as the processor answered still wins.
        if cancel.is_cancelled() {
            return Err(WorkflowError::Cancelled);
        }

        self.videos.set_edited_file(&request.video_id, &url).await?;

        let mut completed = request.clone();
        completed.complete()?;
        self.requests.update(&completed).await?;
        *request = completed;

        tracing::info!(
            edit_request_id = %request.id,
            video_id = %request.video_id,
            processed_video_url = %url,
            "Edit request completed",
        );
        self.events.publish(
            EditEvent::for_request(event_types::EDIT_COMPLETED, request)
                .with_notice(Notice::edit_complete())
                .with_payload(serde_json::json!({ "processed_video_url": url })),
        );

        Ok(url)
    }

    /// Move the request to `Error`, persist it and publish the failure notice.
    async fn record_failure(&self, request: &mut EditRequest, err: &WorkflowError) {
        let step = err.step().map(WorkflowStep::as_str).unwrap_or("store");
        match err {
            WorkflowError::Cancelled => tracing::info!(
                edit_request_id = %request.id,
                "Edit request cancelled",
            ),
            _ => tracing::error!(
                edit_request_id = %request.id,
                video_id = %request.video_id,
                step,
                error = %err,
                "Edit request failed",
            ),
        }

        if let Err(e) = request.fail() {
            tracing::error!(edit_request_id = %request.id, error = %e, "Cannot mark edit request failed");
            return;
        }
        if let Err(e) = self.requests.update(request).await {
            tracing::error!(
                edit_request_id = %request.id,
                error = %e,
                "Failed to persist edit request failure",
            );
        }

        let event_type = match err {
            WorkflowError::Cancelled => event_types::EDIT_CANCELLED,
            _ => event_types::EDIT_FAILED,
        };
        let message = err.user_message();
        self.events.publish(
            EditEvent::for_request(event_type, request)
                .with_notice(Notice::error(Some(message.as_str())))
                .with_payload(serde_json::json!({ "step": step, "error": message })),
        );
    }
}

/// Await one edit service call, bounded by `limit` and aborted by `cancel`.
async fn guarded<T>(
    step: WorkflowStep,
    limit: Duration,
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, EditServiceError>>,
) -> Result<T, WorkflowError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(WorkflowError::Cancelled),
        res = tokio::time::timeout(limit, call) => match res {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(step.wrap(e)),
            Err(_) => Err(WorkflowError::Timeout { step }),
        },
    }
}
