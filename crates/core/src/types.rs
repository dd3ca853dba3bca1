/// Entity identifiers are opaque strings (`edit_…`, `vid_…`, `usr_…`).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a time-ordered identifier with the given prefix, e.g. `edit_0190…`.
///
/// UUID v7 keeps identifiers sortable by creation time.
pub fn new_id(prefix: &str) -> EntityId {
    format!("{prefix}_{}", uuid::Uuid::now_v7().simple())
}
