use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::ProviderHttpError;

#[derive(Debug, Clone)]
pub struct HeyGenConfig {
    pub base_url: String,

    pub api_key: String,
}

impl Default for HeyGenConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.heygen.com".to_string(),
            api_key: String::new(),
        }
    }
}

/// Everything the v2 generate endpoint needs for one avatar video.
#[derive(Debug, Clone)]
pub struct HeyGenRenderSpec {
    pub script_text: String,
    pub avatar_id: String,
    pub voice_id: String,
    pub background_color: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeyGenStatus {
    pub status: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub error: Option<HeyGenJobError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeyGenJobError {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HeyGenEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateData {
    video_id: String,
}

/// Seam over the HeyGen avatar-video API.
#[async_trait]
pub trait HeyGenApi: Send + Sync {
    /// Submit an avatar render. Returns the provider's video id.
    async fn generate(&self, spec: &HeyGenRenderSpec) -> Result<String>;

    async fn status(&self, video_id: &str) -> Result<HeyGenStatus>;

    /// HeyGen serves finished videos from a signed URL, not an API route.
    async fn fetch_video(&self, url: &str) -> Result<Vec<u8>>;
}

#[derive(Clone)]
pub struct HeyGenClient {
    client: Client,
    config: HeyGenConfig,
}

impl HeyGenClient {
    pub fn new(config: HeyGenConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn with_shared_client(client: Client, config: HeyGenConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl HeyGenApi for HeyGenClient {
    async fn generate(&self, spec: &HeyGenRenderSpec) -> Result<String> {
        let url = format!("{}/v2/video/generate", self.config.base_url);
        let body = json!({
            "video_inputs": [{
                "character": {
                    "type": "avatar",
                    "avatar_id": spec.avatar_id,
                    "avatar_style": "normal",
                },
                "voice": {
                    "type": "text",
                    "input_text": spec.script_text,
                    "voice_id": spec.voice_id,
                },
                "background": {
                    "type": "color",
                    "value": spec.background_color,
                },
            }],
            "dimension": {
                "width": spec.width,
                "height": spec.height,
            },
        });

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("HeyGen API error: {} - {}", status, body));
        }

        let envelope: HeyGenEnvelope<GenerateData> = response.json().await?;
        if let Some(err) = envelope.error {
            return Err(anyhow!("HeyGen rejected the render: {}", err));
        }
        let data = envelope
            .data
            .ok_or_else(|| anyhow!("HeyGen response missing video_id"))?;
        debug!("HeyGen job {} created", data.video_id);
        Ok(data.video_id)
    }

    async fn status(&self, video_id: &str) -> Result<HeyGenStatus> {
        let url = format!(
            "{}/v1/video_status.get?video_id={}",
            self.config.base_url,
            urlencoding::encode(video_id)
        );
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.config.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderHttpError::new("HeyGen", status.as_u16(), body).into());
        }

        let envelope: HeyGenEnvelope<HeyGenStatus> = response.json().await?;
        envelope
            .data
            .ok_or_else(|| anyhow!("HeyGen status response missing data"))
    }

    async fn fetch_video(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(anyhow!("HeyGen video download error: {}", status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
