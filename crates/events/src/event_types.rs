//! Well-known event type names.

pub const VIDEO_UPLOADED: &str = "video.uploaded";
pub const VIDEO_SAVED: &str = "video.saved";
pub const VIDEO_SHARED: &str = "video.shared";

pub const EDIT_SUBMITTED: &str = "edit.submitted";
pub const EDIT_PLAN_RECEIVED: &str = "edit.plan_received";
pub const EDIT_COMPLETED: &str = "edit.completed";
pub const EDIT_FAILED: &str = "edit.failed";
pub const EDIT_CANCELLED: &str = "edit.cancelled";
