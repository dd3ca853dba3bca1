//! HTTP-level tests for the server-sent event stream.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{build_test_app, create_video, get_auth, signup, EditBehaviour};
use http_body_util::BodyExt;

#[tokio::test]
async fn event_stream_delivers_own_events_and_ends_on_shutdown() {
    let app = build_test_app(EditBehaviour::Succeed);
    let token = signup(&app.router, "demo").await;
    let other = signup(&app.router, "other").await;

    let response = get_auth(&app.router, "/api/v1/events", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );

    // Events for other users are filtered out, so the first frame is ours.
    create_video(&app.router, &other, "Not mine").await;
    let video_id = create_video(&app.router, &token, "Beach Sunset").await;

    let mut body = response.into_body();
    let frame = tokio::time::timeout(Duration::from_secs(2), body.frame())
        .await
        .expect("own event should be streamed")
        .unwrap()
        .unwrap();
    let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
    assert!(text.starts_with("event: video.uploaded"));
    assert!(text.contains(&video_id));

    app.state.shutdown.cancel();
    let rest = tokio::time::timeout(Duration::from_secs(2), body.collect())
        .await
        .expect("event stream should end once shutdown starts")
        .unwrap()
        .to_bytes();
    assert!(rest.is_empty());
}

#[tokio::test]
async fn event_stream_requires_authentication() {
    let app = build_test_app(EditBehaviour::Succeed);

    let response = common::get(&app.router, "/api/v1/events").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
