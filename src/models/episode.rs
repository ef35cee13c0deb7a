use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of an episode through the production pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EpisodeStatus {
    Draft,
    Generating,
    PendingReview,
    Published,
}

impl EpisodeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Generating => "GENERATING",
            Self::PendingReview => "PENDING_REVIEW",
            Self::Published => "PUBLISHED",
        }
    }
}

impl fmt::Display for EpisodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EpisodeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "GENERATING" => Ok(Self::Generating),
            "PENDING_REVIEW" => Ok(Self::PendingReview),
            "PUBLISHED" => Ok(Self::Published),
            other => Err(format!("unknown episode status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_strings() {
        for status in [
            EpisodeStatus::Draft,
            EpisodeStatus::Generating,
            EpisodeStatus::PendingReview,
            EpisodeStatus::Published,
        ] {
            assert_eq!(status.as_str().parse::<EpisodeStatus>().unwrap(), status);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "pending_review".parse::<EpisodeStatus>().unwrap(),
            EpisodeStatus::PendingReview
        );
    }
}
