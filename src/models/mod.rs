pub mod asset;
pub mod cut;
pub mod episode;
pub mod render;

pub use asset::{AssetKind, AssetPromptOutcome, AssetStatus, BrollPrompt, ThumbnailPrompt};
pub use cut::{CutFormat, CutOutcome, CutStatus};
pub use episode::EpisodeStatus;
pub use render::{
    AspectRatio, AvatarRef, Provider, RenderPhase, RenderReceipt, SoraDuration, VideoStatusReport,
};
