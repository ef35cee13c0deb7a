//! Request/response types shared by the render orchestrator, the status
//! poller, the HTTP handlers, and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// External video providers the pipeline can submit jobs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Sora,
    Heygen,
}

impl Provider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sora => "sora",
            Self::Heygen => "heygen",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sora" => Ok(Self::Sora),
            "heygen" => Ok(Self::Heygen),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

/// Output aspect ratio, mapped to provider-specific resolution strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Vertical,
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    /// Resolution string for the Sora video API.
    #[must_use]
    pub const fn sora_size(self) -> &'static str {
        match self {
            Self::Vertical => "720x1280",
            Self::Square => "720x720",
            Self::Wide => "1280x720",
        }
    }

    /// Pixel dimensions for the HeyGen video API.
    #[must_use]
    pub const fn heygen_dimension(self) -> (u32, u32) {
        match self {
            Self::Vertical => (1080, 1920),
            Self::Square => (1080, 1080),
            Self::Wide => (1920, 1080),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wide => "16:9",
            Self::Vertical => "9:16",
            Self::Square => "1:1",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::Vertical
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "16:9" => Ok(Self::Wide),
            "9:16" => Ok(Self::Vertical),
            "1:1" => Ok(Self::Square),
            other => Err(format!("unknown aspect ratio: {other} (expected 16:9, 9:16 or 1:1)")),
        }
    }
}

/// The three clip durations the Sora API accepts. Parsing is the
/// validation gate: anything else never reaches the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoraDuration {
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "12")]
    Twelve,
}

impl SoraDuration {
    /// The wire value: the API wants a string, not a number.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Four => "4",
            Self::Eight => "8",
            Self::Twelve => "12",
        }
    }
}

impl Default for SoraDuration {
    fn default() -> Self {
        Self::Eight
    }
}

impl fmt::Display for SoraDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoraDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4" => Ok(Self::Four),
            "8" => Ok(Self::Eight),
            "12" => Ok(Self::Twelve),
            other => Err(format!("invalid duration: {other} (must be one of: 4, 8, 12)")),
        }
    }
}

/// An avatar reference, disambiguated once at the boundary: either one of
/// our stored avatar records or a provider-native avatar id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarRef {
    Local(String),
    Provider(String),
}

impl FromStr for AvatarRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("empty avatar reference".to_string());
        }
        match s.strip_prefix("local:") {
            Some(id) if !id.is_empty() => Ok(Self::Local(id.to_string())),
            Some(_) => Err("empty local avatar id".to_string()),
            None => Ok(Self::Provider(s.to_string())),
        }
    }
}

/// What the caller gets back when a render job has been submitted.
#[derive(Debug, Clone, Serialize)]
pub struct RenderReceipt {
    pub provider: Provider,
    pub video_id: String,
    pub asset_id: String,
    pub status: RenderPhase,
    pub poll_hint: String,
}

/// Coarse phase reported by the status poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPhase {
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for RenderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processing => f.write_str("processing"),
            Self::Completed => f.write_str("completed"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Poll result for one provider job.
#[derive(Debug, Clone, Serialize)]
pub struct VideoStatusReport {
    pub status: RenderPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl VideoStatusReport {
    #[must_use]
    pub const fn processing() -> Self {
        Self {
            status: RenderPhase::Processing,
            video_url: None,
            error: None,
            error_code: None,
        }
    }

    #[must_use]
    pub fn completed(url: impl Into<String>) -> Self {
        Self {
            status: RenderPhase::Completed,
            video_url: Some(url.into()),
            error: None,
            error_code: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>, error_code: Option<String>) -> Self {
        Self {
            status: RenderPhase::Failed,
            video_url: None,
            error: Some(error.into()),
            error_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_allowed_durations_parse() {
        assert_eq!("4".parse::<SoraDuration>().unwrap(), SoraDuration::Four);
        assert_eq!("8".parse::<SoraDuration>().unwrap(), SoraDuration::Eight);
        assert_eq!("12".parse::<SoraDuration>().unwrap(), SoraDuration::Twelve);
        for bad in ["5", "0", "16", "8.0", "", "eight"] {
            assert!(bad.parse::<SoraDuration>().is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn aspect_ratio_size_lookup() {
        assert_eq!(AspectRatio::Vertical.sora_size(), "720x1280");
        assert_eq!(AspectRatio::Square.sora_size(), "720x720");
        assert_eq!(AspectRatio::Wide.sora_size(), "1280x720");
        assert_eq!(AspectRatio::default().sora_size(), "720x1280");
    }

    #[test]
    fn avatar_ref_disambiguation() {
        assert_eq!(
            "local:abc-123".parse::<AvatarRef>().unwrap(),
            AvatarRef::Local("abc-123".to_string())
        );
        assert_eq!(
            "Daisy-inskirt-20220818".parse::<AvatarRef>().unwrap(),
            AvatarRef::Provider("Daisy-inskirt-20220818".to_string())
        );
        assert!("local:".parse::<AvatarRef>().is_err());
    }
}
