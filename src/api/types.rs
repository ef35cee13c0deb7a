use serde::{Deserialize, Serialize};

use crate::entities::{asset, cut, episode, script};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EpisodeDto {
    pub id: String,
    pub series: String,
    pub episode_number: i32,
    pub title: String,
    pub premise: Option<String>,
    pub status: String,
    pub publish_date_target: Option<String>,
    pub published_at: Option<String>,
    pub external_video_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<episode::Model> for EpisodeDto {
    fn from(m: episode::Model) -> Self {
        Self {
            id: m.id,
            series: m.series,
            episode_number: m.episode_number,
            title: m.title,
            premise: m.premise,
            status: m.status,
            publish_date_target: m.publish_date_target,
            published_at: m.published_at,
            external_video_id: m.external_video_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScriptDto {
    pub id: String,
    pub episode_id: String,
    pub version: i32,
    pub canonical: bool,
    pub model: Option<String>,
    pub content_chars: usize,
    pub created_at: String,
}

impl From<script::Model> for ScriptDto {
    fn from(m: script::Model) -> Self {
        Self {
            id: m.id,
            episode_id: m.episode_id,
            version: m.version,
            canonical: m.canonical,
            model: m.model,
            content_chars: m.content.chars().count(),
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CutDto {
    pub id: String,
    pub episode_id: String,
    pub script_id: Option<String>,
    pub format: String,
    pub status: String,
    pub duration_target: i32,
    pub video_url: Option<String>,
    pub created_at: String,
}

impl From<cut::Model> for CutDto {
    fn from(m: cut::Model) -> Self {
        Self {
            id: m.id,
            episode_id: m.episode_id,
            script_id: m.script_id,
            format: m.format,
            status: m.status,
            duration_target: m.duration_target,
            video_url: m.video_url,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssetDto {
    pub id: String,
    pub episode_id: String,
    pub cut_id: Option<String>,
    pub kind: String,
    pub status: String,
    pub provider: Option<String>,
    pub provider_job_id: Option<String>,
    pub url: Option<String>,
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<asset::Model> for AssetDto {
    fn from(m: asset::Model) -> Self {
        Self {
            id: m.id,
            episode_id: m.episode_id,
            cut_id: m.cut_id,
            kind: m.kind,
            status: m.status,
            provider: m.provider,
            provider_job_id: m.provider_job_id,
            url: m.url,
            error: m.error,
            error_code: m.error_code,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EpisodeDetailDto {
    pub episode: EpisodeDto,
    pub scripts: Vec<ScriptDto>,
    pub cuts: Vec<CutDto>,
    pub assets: Vec<AssetDto>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEpisodeRequest {
    pub series: String,
    pub episode_number: i32,
    pub title: String,
    #[serde(default)]
    pub premise: Option<String>,
    /// Target publish date, RFC3339.
    #[serde(default)]
    pub publish_date_target: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PublishEpisodeRequest {
    /// Id of the uploaded video on the destination platform.
    #[serde(default)]
    pub external_video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListEpisodesQuery {
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateCutsRequest {
    /// Format tags to generate; all five when omitted.
    #[serde(default)]
    pub formats: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct SoraRenderBody {
    pub episode_id: String,
    #[serde(default)]
    pub cut_id: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    /// "4", "8", or "12"; defaults to "8".
    #[serde(default)]
    pub seconds: Option<String>,
    /// "16:9", "9:16", or "1:1"; defaults to "9:16".
    #[serde(default)]
    pub aspect: Option<String>,
    /// Model override, e.g. "sora-2-pro".
    #[serde(default)]
    pub model: Option<String>,
    /// Reference image for the render.
    #[serde(default)]
    pub input_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HeyGenRenderBody {
    pub episode_id: String,
    #[serde(default)]
    pub cut_id: Option<String>,
    #[serde(default)]
    pub script_text: Option<String>,
    /// Avatar id; prefix with "local:" to reference a stored avatar.
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub aspect: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
