pub mod episode;
pub mod generate;
pub mod render;
pub mod status;

pub use episode::{EpisodeDetail, EpisodeService};
pub use generate::GenerationService;
pub use render::{HeyGenRenderRequest, RenderLocks, RenderService, SoraRenderRequest};
pub use status::StatusService;

use thiserror::Error;

/// Domain errors shared by the pipeline services. Each variant maps to
/// one HTTP status at the API boundary and one message shape in the CLI.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("External API error: {service} - {message}")]
    Provider { service: String, message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StudioError {
    pub fn provider(service: &str, err: impl std::fmt::Display) -> Self {
        Self::Provider {
            service: service.to_string(),
            message: err.to_string(),
        }
    }

    pub fn episode_not_found(id: &str) -> Self {
        Self::NotFound(format!("Episode {} not found", id))
    }
}

impl From<sea_orm::DbErr> for StudioError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for StudioError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sea_orm::DbErr>() {
            Ok(db) => Self::Database(db.to_string()),
            Err(other) => Self::Internal(other.to_string()),
        }
    }
}
