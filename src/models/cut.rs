use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platform-specific cut formats, with the duration and pacing spec the
/// adaptation prompt is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CutFormat {
    YtLong,
    YtShort,
    Tiktok,
    X,
    Linkedin,
}

impl CutFormat {
    pub const ALL: [Self; 5] = [
        Self::YtLong,
        Self::YtShort,
        Self::Tiktok,
        Self::X,
        Self::Linkedin,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YtLong => "YT_LONG",
            Self::YtShort => "YT_SHORT",
            Self::Tiktok => "TIKTOK",
            Self::X => "X",
            Self::Linkedin => "LINKEDIN",
        }
    }

    /// Target duration in seconds for this platform.
    #[must_use]
    pub const fn duration_target(self) -> i32 {
        match self {
            Self::YtLong => 600,
            Self::YtShort | Self::Tiktok => 35,
            Self::X => 60,
            Self::Linkedin => 120,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::YtLong => "YouTube Long-Form",
            Self::YtShort => "YouTube Shorts",
            Self::Tiktok => "TikTok",
            Self::X => "X (Twitter)",
            Self::Linkedin => "LinkedIn",
        }
    }

    #[must_use]
    pub const fn specs(self) -> &'static str {
        match self {
            Self::YtLong => "7-10 minutes, educational deep dive",
            Self::YtShort => "30-60 seconds, vertical, hook-first",
            Self::Tiktok => "15-60 seconds, fast-paced, pattern interrupt",
            Self::X => "30-90 seconds, punchy, quotable",
            Self::Linkedin => "1-3 minutes, professional, actionable",
        }
    }
}

impl fmt::Display for CutFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CutFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "YT_LONG" => Ok(Self::YtLong),
            "YT_SHORT" => Ok(Self::YtShort),
            "TIKTOK" => Ok(Self::Tiktok),
            "X" => Ok(Self::X),
            "LINKEDIN" => Ok(Self::Linkedin),
            other => Err(format!("unknown cut format: {other}")),
        }
    }
}

/// Render lifecycle of a cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CutStatus {
    Draft,
    Rendering,
    Rendered,
    Failed,
}

impl CutStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Rendering => "RENDERING",
            Self::Rendered => "RENDERED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for CutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "RENDERING" => Ok(Self::Rendering),
            "RENDERED" => Ok(Self::Rendered),
            "FAILED" => Ok(Self::Failed),
            other => Err(format!("unknown cut status: {other}")),
        }
    }
}

/// Per-format result of a cut-generation call. Unrecognized tags and
/// per-format failures are reported back to the caller instead of being
/// dropped on the floor.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CutOutcome {
    Created {
        format: CutFormat,
        cut_id: String,
        script_id: String,
        duration_target: i32,
    },
    Skipped {
        format: String,
        reason: String,
    },
    Failed {
        format: CutFormat,
        error: String,
    },
}

impl CutOutcome {
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_table_matches_platform_expectations() {
        assert_eq!(CutFormat::YtShort.duration_target(), 35);
        assert_eq!(CutFormat::Linkedin.duration_target(), 120);
        assert_eq!("yt_short".parse::<CutFormat>().unwrap(), CutFormat::YtShort);
        assert!("BOGUS".parse::<CutFormat>().is_err());
    }
}
