use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a media asset is: a generation-prompt placeholder (B-roll,
/// thumbnail) or a provider render (Sora, HeyGen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetKind {
    Broll,
    Thumbnail,
    Sora,
    Heygen,
}

impl AssetKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Broll => "BROLL",
            Self::Thumbnail => "THUMBNAIL",
            Self::Sora => "SORA",
            Self::Heygen => "HEYGEN",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BROLL" | "B-ROLL" => Ok(Self::Broll),
            "THUMBNAIL" => Ok(Self::Thumbnail),
            "SORA" => Ok(Self::Sora),
            "HEYGEN" => Ok(Self::Heygen),
            other => Err(format!("unknown asset type: {other}")),
        }
    }
}

/// Asset lifecycle. PENDING is reserved for prompt placeholders that have
/// not been submitted to any provider; a render asset starts at PROCESSING
/// because the provider job already exists by the time the row does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl AssetStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "PROCESSING" => Ok(Self::Processing),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            other => Err(format!("unknown asset status: {other}")),
        }
    }
}

/// One B-roll shot description as returned by the generation model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrollPrompt {
    pub scene: String,
    pub prompt: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub timing: Option<String>,
}

/// Thumbnail concept as returned by the generation model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailPrompt {
    pub concept: String,
    pub image_prompt: String,
    #[serde(default)]
    pub text_overlay: Option<String>,
    #[serde(default)]
    pub color_scheme: Option<String>,
}

/// Per-kind result of an asset-prompt generation call. Parse failures are
/// reported as tagged outcomes so partial failures stay observable.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AssetPromptOutcome {
    Created {
        kind: AssetKind,
        asset_ids: Vec<String>,
    },
    ParseFailed {
        kind: AssetKind,
        error: String,
    },
    ModelFailed {
        kind: AssetKind,
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(AssetStatus::Completed.is_terminal());
        assert!(AssetStatus::Failed.is_terminal());
        assert!(!AssetStatus::Processing.is_terminal());
        assert!(!AssetStatus::Pending.is_terminal());
    }

    #[test]
    fn broll_prompt_parses_model_output() {
        let raw = r#"[{"scene":"Ledger Pages","prompt":"Close-up of vintage ledger","duration":4,"timing":"Hook"}]"#;
        let items: Vec<BrollPrompt> = serde_json::from_str(raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].scene, "Ledger Pages");
    }
}
