// src/util/ids.rs
use chrono::Utc;
use uuid::Uuid;

/// Random, process-unique identifier for cards and links.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
