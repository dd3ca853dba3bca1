#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use promptcut_api::auth::session::SessionStore;
use promptcut_api::config::ServerConfig;
use promptcut_api::prompts::PromptLog;
use promptcut_api::router::build_app_router;
use promptcut_api::state::AppState;
use promptcut_client::{EditServiceError, PlanRequester, VideoProcessor};
use promptcut_core::edit_plan::{EditPlan, Effect};
use promptcut_core::prompt::PromptEntry;
use promptcut_db::MemoryStore;
use promptcut_events::EventBus;
use promptcut_pipeline::{EditWorkflow, WorkflowConfig};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

pub const PROCESSED_URL: &str = "https://example/out.mp4";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_mins: 60,
        database_url: None,
    }
}

// ---------------------------------------------------------------------------
// Edit service fake
// ---------------------------------------------------------------------------

/// How the fake edit service answers.
#[derive(Clone, Copy)]
pub enum EditBehaviour {
    Succeed,
    /// The planner reports `status: "error"` with this message.
    PlanError(&'static str),
    /// The planner never answers; useful for cancellation tests.
    Hang,
}

pub struct FakeEditService {
    behaviour: EditBehaviour,
    pub plan_calls: AtomicUsize,
    pub process_calls: AtomicUsize,
    pub history_lengths: std::sync::Mutex<Vec<usize>>,
}

impl FakeEditService {
    pub fn new(behaviour: EditBehaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            plan_calls: AtomicUsize::new(0),
            process_calls: AtomicUsize::new(0),
            history_lengths: std::sync::Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl PlanRequester for FakeEditService {
    async fn request_plan(
        &self,
        prompt: &str,
        _video_id: &str,
        history: &[PromptEntry],
        _idempotency_key: &str,
    ) -> Result<EditPlan, EditServiceError> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        self.history_lengths.lock().unwrap().push(history.len());
        match self.behaviour {
            EditBehaviour::Succeed => Ok(EditPlan::new(vec![Effect::new("text")
                .with_range(0.0, 5.0)
                .with_parameter("text", serde_json::json!(prompt))])),
            EditBehaviour::PlanError(message) => Err(EditServiceError::Upstream {
                message: message.to_string(),
            }),
            EditBehaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(EditServiceError::Upstream {
                    message: "unreachable".into(),
                })
            }
        }
    }
}

#[async_trait]
impl VideoProcessor for FakeEditService {
    async fn process(
        &self,
        _video_uri: &str,
        _plan: &EditPlan,
        _idempotency_key: &str,
    ) -> Result<String, EditServiceError> {
        self.process_calls.fetch_add(1, Ordering::SeqCst);
        Ok(PROCESSED_URL.to_string())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub edit_service: Arc<FakeEditService>,
}

/// Build the full application over the in-memory store and a fake edit
/// service, using the same router and middleware stack as production.
pub fn build_test_app(behaviour: EditBehaviour) -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let edit_service = FakeEditService::new(behaviour);
    let event_bus = Arc::new(EventBus::default());

    let workflow = Arc::new(EditWorkflow::new(
        edit_service.clone(),
        edit_service.clone(),
        store.clone(),
        store.clone(),
        Arc::clone(&event_bus),
        WorkflowConfig::default(),
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        pool: None,
        users: store.clone(),
        videos: store.clone(),
        edit_requests: store,
        sessions: Arc::new(SessionStore::new(chrono::Duration::minutes(
            config.session_ttl_mins,
        ))),
        prompts: Arc::new(PromptLog::new()),
        workflow,
        event_bus,
        shutdown: CancellationToken::new(),
    };

    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
        edit_service,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up a user and return their bearer token.
pub async fn signup(app: &Router, username: &str) -> String {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "correct-horse",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register a video for the token's user and return its id.
pub async fn create_video(app: &Router, token: &str, title: &str) -> String {
    let body = serde_json::json!({
        "original_video_file": "https://cdn.example/beach.mp4",
        "video_title": title,
    });
    let response = post_json_auth(app, "/api/v1/videos", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Poll an edit request until it leaves `In Progress`; returns its JSON.
pub async fn wait_for_terminal(app: &Router, token: &str, edit_id: &str) -> serde_json::Value {
    for _ in 0..200 {
        let response = get_auth(app, &format!("/api/v1/edits/{edit_id}"), token).await;
        let json = body_json(response).await;
        if json["data"]["is_terminal"] == true {
            return json["data"].clone();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("edit request {edit_id} never finished");
}
