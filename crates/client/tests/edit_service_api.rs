//! Integration tests for [`EditServiceApi`] against a mock edit service.
//!
//! Covers the success paths for both endpoints, the mapping of
//! non-2xx responses and `status: "error"` bodies onto
//! [`EditServiceError`], and the headers the client attaches.

use std::time::Duration;

use assert_matches::assert_matches;
use promptcut_client::api::IDEMPOTENCY_KEY_HEADER;
use promptcut_client::{EditServiceApi, EditServiceConfig, EditServiceError, PlanRequester, VideoProcessor};
use promptcut_core::edit_plan::{EditPlan, Effect};
use promptcut_core::prompt::PromptEntry;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer, token: Option<&str>) -> EditServiceApi {
    EditServiceApi::new(EditServiceConfig {
        base_url: server.uri(),
        api_token: token.map(str::to_string),
        timeout: Duration::from_secs(5),
    })
}

fn caption_plan() -> serde_json::Value {
    json!({
        "effects": [
            {"type": "text", "startTime": 0, "endTime": 5, "parameters": {"text": "Add a caption"}}
        ]
    })
}

// ---------------------------------------------------------------------------
// Plan requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_plan_returns_plan_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/aiEdit"))
        .and(body_partial_json(json!({"prompt": "Add a caption", "videoId": "v1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "editPlan": caption_plan()})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let plan = api_for(&server, None)
        .request_plan("Add a caption", "v1", &[], "edit_1")
        .await
        .expect("plan request should succeed");

    assert_eq!(plan.effects.len(), 1);
    assert_eq!(plan.effects[0].effect_type, "text");
    assert_eq!(plan.effects[0].end_time, Some(5.0));
}

#[tokio::test]
async fn request_plan_sends_history_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/aiEdit"))
        .and(header("authorization", "Bearer secret-token"))
        .and(header(IDEMPOTENCY_KEY_HEADER, "edit_42"))
        .and(body_partial_json(json!({
            "conversationHistory": [{"prompt": "Make it brighter"}]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "editPlan": {"effects": []}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let history = vec![PromptEntry::now("Make it brighter")];
    let plan = api_for(&server, Some("secret-token"))
        .request_plan("Add a caption", "v1", &history, "edit_42")
        .await
        .expect("plan request should succeed");

    assert!(plan.effects.is_empty());
}

#[tokio::test]
async fn request_plan_maps_error_payload_to_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/aiEdit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "error", "message": "quota exceeded"})),
        )
        .mount(&server)
        .await;

    let err = api_for(&server, None)
        .request_plan("Add a caption", "v1", &[], "edit_1")
        .await
        .unwrap_err();

    assert_matches!(&err, EditServiceError::Upstream { message } if message == "quota exceeded");
    assert!(err.is_upstream());
}

#[tokio::test]
async fn request_plan_success_without_plan_uses_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/aiEdit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .mount(&server)
        .await;

    let err = api_for(&server, None)
        .request_plan("Add a caption", "v1", &[], "edit_1")
        .await
        .unwrap_err();

    assert_matches!(err, EditServiceError::Upstream { message } if message == "AI processing failed");
}

#[tokio::test]
async fn request_plan_maps_non_2xx_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/aiEdit"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&server)
        .await;

    let err = api_for(&server, None)
        .request_plan("Add a caption", "v1", &[], "edit_1")
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_matches!(err, EditServiceError::Api { status: 503, body } if body == "service unavailable");
}

#[tokio::test]
async fn request_plan_maps_malformed_body_to_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/aiEdit"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = api_for(&server, None)
        .request_plan("Add a caption", "v1", &[], "edit_1")
        .await
        .unwrap_err();

    assert_matches!(err, EditServiceError::Request(_));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Bind then drop a server so the port is very likely closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let api = EditServiceApi::new(EditServiceConfig {
        base_url: uri,
        api_token: None,
        timeout: Duration::from_secs(2),
    });

    let err = api
        .request_plan("Add a caption", "v1", &[], "edit_1")
        .await
        .unwrap_err();

    assert!(err.is_transport());
}

// ---------------------------------------------------------------------------
// Processing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn process_forwards_plan_and_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/processEdits"))
        .and(header(IDEMPOTENCY_KEY_HEADER, "edit_7"))
        .and(body_partial_json(json!({
            "videoFileUrl": "https://cdn.example/in.mp4",
            "editPlan": {"effects": [{"type": "filter", "parameters": {"name": "brightness"}}], "version": 2}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"status": "success", "editedVideoUrl": "https://example/out.mp4"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut plan = EditPlan::new(vec![
        Effect::new("filter").with_parameter("name", json!("brightness"))
    ]);
    plan.extra.insert("version".into(), json!(2));

    let url = api_for(&server, None)
        .process("https://cdn.example/in.mp4", &plan, "edit_7")
        .await
        .expect("processing should succeed");

    assert_eq!(url, "https://example/out.mp4");
}

#[tokio::test]
async fn process_maps_error_payload_to_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/processEdits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
        .mount(&server)
        .await;

    let err = api_for(&server, None)
        .process("https://cdn.example/in.mp4", &EditPlan::default(), "edit_1")
        .await
        .unwrap_err();

    assert_matches!(err, EditServiceError::Upstream { message } if message == "Video processing failed");
}

#[tokio::test]
async fn process_maps_server_error_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/processEdits"))
        .respond_with(ResponseTemplate::new(500).set_body_string("encoder crashed"))
        .mount(&server)
        .await;

    let err = api_for(&server, None)
        .process("https://cdn.example/in.mp4", &EditPlan::default(), "edit_1")
        .await
        .unwrap_err();

    assert_matches!(err, EditServiceError::Api { status: 500, .. });
}
