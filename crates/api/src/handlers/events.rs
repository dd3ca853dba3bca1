//! Server-sent event stream of the caller's edit events and notices.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::middleware::auth::AuthSession;
use crate::state::AppState;

/// GET /api/v1/events
///
/// Each SSE message is named after the event type (`edit.completed`, ...)
/// and carries the serialized event, including any notice, as JSON. The
/// stream ends when the server begins shutting down.
pub async fn stream_events(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let user_id = auth.session.user_id;
    tracing::debug!(user_id = %user_id, "Event stream opened");

    let events = BroadcastStream::new(state.event_bus.subscribe()).filter_map(move |msg| {
        match msg {
            Ok(event) if event.is_for_user(&user_id) => {
                match Event::default().event(&event.event_type).json_data(&event) {
                    Ok(sse) => Some(Ok(sse)),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to encode event for stream");
                        None
                    }
                }
            }
            Ok(_) => None,
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(user_id = %user_id, skipped, "Event stream lagged");
                None
            }
        }
    });

    let events = futures::StreamExt::take_until(events, state.shutdown.clone().cancelled_owned());

    Sse::new(events).keep_alive(KeepAlive::default())
}
