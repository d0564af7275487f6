/// All entity identifiers are opaque UUID-v4 strings.
pub type DbId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh entity identifier.
pub fn new_id() -> DbId {
    uuid::Uuid::new_v4().to_string()
}
