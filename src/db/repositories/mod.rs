pub mod asset;
pub mod avatar;
pub mod cut;
pub mod episode;
pub mod script;

/// RFC 3339 timestamp used for every created_at/updated_at column.
pub(crate) fn now_ts() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
