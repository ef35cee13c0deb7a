use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::ProviderHttpError;

#[derive(Debug, Clone)]
pub struct SoraConfig {
    pub base_url: String,

    pub api_key: String,

    pub model: String,
}

impl Default for SoraConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "sora-2".to_string(),
        }
    }
}

/// Submission payload for one Sora render.
#[derive(Debug, Clone, Default)]
pub struct SoraCreateVideo {
    pub prompt: String,
    /// Wire value for the clip length: "4", "8", or "12".
    pub seconds: String,
    /// Resolution string, e.g. "720x1280".
    pub size: String,
    /// Overrides the configured model when set.
    pub model: Option<String>,
    /// Reference image the clip should stay visually anchored to.
    pub input_reference: Option<String>,
}

/// One video job as reported by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct SoraVideo {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub error: Option<SoraJobError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoraJobError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Seam over the Sora video API so the render pipeline can be exercised
/// without network access.
#[async_trait]
pub trait SoraApi: Send + Sync {
    /// Submit a render job. Returns the provider's video id.
    async fn create_video(&self, req: &SoraCreateVideo) -> Result<String>;

    async fn get_video(&self, video_id: &str) -> Result<SoraVideo>;

    /// Fetch the rendered MP4 bytes for a completed job.
    async fn download_content(&self, video_id: &str) -> Result<Vec<u8>>;
}

#[derive(Clone)]
pub struct SoraClient {
    client: Client,
    config: SoraConfig,
}

impl SoraClient {
    pub fn new(config: SoraConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn with_shared_client(client: Client, config: SoraConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl SoraApi for SoraClient {
    async fn create_video(&self, req: &SoraCreateVideo) -> Result<String> {
        let url = format!("{}/videos", self.config.base_url);
        let mut body = json!({
            "prompt": req.prompt,
            "model": req.model.as_deref().unwrap_or(&self.config.model),
            "size": req.size,
            "seconds": req.seconds,
        });
        if let Some(reference) = &req.input_reference {
            body["input_reference"] = json!(reference);
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Sora API error: {} - {}", status, body));
        }

        let video: SoraVideo = response.json().await?;
        debug!("Sora job {} created (status {})", video.id, video.status);
        Ok(video.id)
    }

    async fn get_video(&self, video_id: &str) -> Result<SoraVideo> {
        let url = format!("{}/videos/{}", self.config.base_url, video_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderHttpError::new("Sora", status.as_u16(), body).into());
        }

        Ok(response.json().await?)
    }

    async fn download_content(&self, video_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/videos/{}/content", self.config.base_url, video_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Sora content download error: {} - {}", status, body));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
