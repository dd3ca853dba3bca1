//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`EditEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use promptcut_core::edit_request::{EditRequest, EditRequestStatus};
use promptcut_core::notice::Notice;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// EditEvent
// ---------------------------------------------------------------------------

/// Something that happened to a video or an edit request.
///
/// Constructed via [`EditEvent::new`] (or [`EditEvent::for_request`]) and
/// enriched with the `with_*` builder methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditEvent {
    /// Dot-separated event name, e.g. `"edit.completed"`.
    pub event_type: String,

    pub edit_request_id: Option<String>,

    pub video_id: Option<String>,

    /// The user the event belongs to. Subscribers use it to route events.
    pub actor_user_id: Option<String>,

    /// Edit request status after the event, if it concerns one.
    pub status: Option<EditRequestStatus>,

    /// Toast-style message for the client. Never persisted.
    pub notice: Option<Notice>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl EditEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            edit_request_id: None,
            video_id: None,
            actor_user_id: None,
            status: None,
            notice: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Create an event describing the current state of `request`.
    pub fn for_request(event_type: impl Into<String>, request: &EditRequest) -> Self {
        let mut event = Self::new(event_type)
            .with_video(request.video_id.clone())
            .with_actor(request.user_id.clone());
        event.edit_request_id = Some(request.id.clone());
        event.status = Some(request.status);
        event
    }

    pub fn with_video(mut self, video_id: impl Into<String>) -> Self {
        self.video_id = Some(video_id.into());
        self
    }

    pub fn with_actor(mut self, user_id: impl Into<String>) -> Self {
        self.actor_user_id = Some(user_id.into());
        self
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Whether the event should be delivered to `user_id`.
    pub fn is_for_user(&self, user_id: &str) -> bool {
        self.actor_user_id.as_deref() == Some(user_id)
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`EditEvent`].
///
/// # Usage
///
/// ```rust
/// use promptcut_events::bus::{EditEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(EditEvent::new("video.uploaded"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<EditEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: EditEvent) {
        tracing::debug!(
            event_type = %event.event_type,
            edit_request_id = event.edit_request_id.as_deref(),
            "Publishing event",
        );
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<EditEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_types;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = EditEvent::new(event_types::VIDEO_UPLOADED)
            .with_video("vid_1")
            .with_actor("usr_7")
            .with_notice(Notice::upload(None))
            .with_payload(serde_json::json!({"key": "value"}));

        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "video.uploaded");
        assert_eq!(received.video_id.as_deref(), Some("vid_1"));
        assert_eq!(received.actor_user_id.as_deref(), Some("usr_7"));
        assert_eq!(received.notice.unwrap().title, "Video uploaded");
        assert_eq!(received.payload["key"], "value");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(EditEvent::new("multi.test"));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.event_type, "multi.test");
        assert_eq!(e2.event_type, "multi.test");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(EditEvent::new("orphan.event"));
    }

    #[test]
    fn for_request_copies_identity_and_status() {
        let request = EditRequest::new("vid_9", "usr_3", "Trim the intro");
        let event = EditEvent::for_request(event_types::EDIT_SUBMITTED, &request);

        assert_eq!(event.edit_request_id.as_deref(), Some(request.id.as_str()));
        assert_eq!(event.video_id.as_deref(), Some("vid_9"));
        assert_eq!(event.status, Some(EditRequestStatus::InProgress));
        assert!(event.is_for_user("usr_3"));
        assert!(!event.is_for_user("usr_4"));
        assert!(event.notice.is_none());
    }
}
