//! CLI module - command-line interface for the Studio pipeline.
//!
//! Argument parsing is clap-based; each subcommand has a handler in
//! `commands/`.

mod commands;

use clap::{Parser, Subcommand};

/// Studio - episode production pipeline
/// Scripts, platform cuts, and provider video renders from the terminal
#[derive(Parser)]
#[command(name = "studio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server and background pipeline
    #[command(alias = "daemon")]
    Serve,

    /// Manage episodes
    #[command(alias = "ep")]
    Episode {
        #[command(subcommand)]
        command: EpisodeCommands,
    },

    /// Render and track provider videos
    Video {
        #[command(subcommand)]
        command: VideoCommands,
    },

    /// Inspect and validate configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum EpisodeCommands {
    /// List episodes
    #[command(alias = "ls")]
    List {
        /// Filter by series
        #[arg(long)]
        series: Option<String>,
        /// Filter by status (DRAFT, GENERATING, PENDING_REVIEW, PUBLISHED)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one episode with its scripts, cuts, and assets
    Show {
        /// Episode ID
        id: String,
    },

    /// Create a new draft episode
    Create {
        /// Series the episode belongs to
        #[arg(long)]
        series: String,
        /// Episode number within the series
        #[arg(long)]
        number: i32,
        /// Episode title
        #[arg(long)]
        title: String,
        /// One-paragraph premise used by the generation prompts
        #[arg(long)]
        premise: Option<String>,
        /// Target publish date (RFC3339)
        #[arg(long)]
        publish_date: Option<String>,
    },

    /// Delete an episode and everything attached to it
    #[command(alias = "rm")]
    Delete {
        /// Episode ID
        id: String,
    },

    /// Set the episode status directly
    Status {
        /// Episode ID
        id: String,
        /// Target status (DRAFT, GENERATING, PENDING_REVIEW, PUBLISHED)
        status: String,
    },

    /// Generate a new canonical script draft
    GenerateScript {
        /// Episode ID
        id: String,
    },

    /// Adapt the canonical script into platform cuts
    GenerateCuts {
        /// Episode ID
        id: String,
        /// Formats to generate (YT_LONG, YT_SHORT, TIKTOK, X, LINKEDIN);
        /// all five when omitted
        #[arg(long, value_delimiter = ',')]
        formats: Option<Vec<String>>,
    },

    /// Generate B-roll and thumbnail prompt placeholders
    GenerateAssets {
        /// Episode ID
        id: String,
    },

    /// Publish an episode (requires a script, no renders in flight)
    Publish {
        /// Episode ID
        id: String,
        /// Id of the uploaded video on the destination platform
        #[arg(long)]
        external_id: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum VideoCommands {
    /// Submit a render job
    Render {
        /// Provider: sora or heygen
        provider: String,
        /// Episode ID
        episode_id: String,
        /// Target a specific cut
        #[arg(long)]
        cut: Option<String>,
        /// Explicit prompt (Sora) instead of the script-derived default
        #[arg(long)]
        prompt: Option<String>,
        /// Clip length in seconds: 4, 8, or 12 (Sora)
        #[arg(long)]
        seconds: Option<String>,
        /// Aspect ratio: 16:9, 9:16, or 1:1
        #[arg(long)]
        aspect: Option<String>,
        /// Avatar id; prefix with "local:" for a stored avatar (HeyGen)
        #[arg(long)]
        avatar: Option<String>,
        /// Explicit narration text instead of the script (HeyGen)
        #[arg(long)]
        script_text: Option<String>,
        /// Model override, e.g. sora-2-pro (Sora)
        #[arg(long)]
        model: Option<String>,
        /// Reference image for the render (Sora)
        #[arg(long)]
        input_reference: Option<String>,
    },

    /// Poll one provider job and advance the tracked asset
    Status {
        /// Provider job id
        job_id: String,
    },

    /// Poll until the job reaches a terminal state
    Wait {
        /// Provider job id
        job_id: String,
        /// Seconds between polls
        #[arg(long)]
        poll_seconds: Option<u64>,
        /// Give up after this many seconds
        #[arg(long)]
        timeout_seconds: Option<u64>,
    },

    /// List video assets for an episode
    #[command(alias = "ls")]
    List {
        /// Episode ID
        episode_id: String,
        /// Filter by asset type (BROLL, THUMBNAIL, SORA, HEYGEN)
        #[arg(long = "type")]
        kind: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the active configuration (secrets redacted)
    Show,

    /// Check the configuration for problems
    Validate,

    /// Create a default config file
    Init,
}

pub use commands::*;
