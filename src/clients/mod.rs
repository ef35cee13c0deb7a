pub mod heygen;
pub mod llm;
pub mod sora;

pub use heygen::{HeyGenApi, HeyGenClient, HeyGenConfig, HeyGenRenderSpec, HeyGenStatus};
pub use llm::{ChatModel, LlmConfig, OpenAiChatClient};
pub use sora::{SoraApi, SoraClient, SoraConfig, SoraCreateVideo, SoraJobError, SoraVideo};

use thiserror::Error;

/// Non-2xx reply from a provider endpoint, kept structured so the status
/// poller can persist the HTTP code and response body.
#[derive(Debug, Error)]
#[error("{service} API error: {code} - {body}")]
pub struct ProviderHttpError {
    pub service: &'static str,
    pub code: u16,
    pub body: String,
}

impl ProviderHttpError {
    pub fn new(service: &'static str, code: u16, body: impl Into<String>) -> Self {
        Self {
            service,
            code,
            body: body.into(),
        }
    }
}
