//! LLM generation stages: full scripts, per-platform cut adaptations, and
//! B-roll/thumbnail prompt sets.

use std::sync::Arc;

use tracing::{info, warn};

use super::StudioError;
use crate::clients::ChatModel;
use crate::constants;
use crate::db::Store;
use crate::entities::script;
use crate::models::{
    AssetKind, AssetPromptOutcome, BrollPrompt, CutFormat, CutOutcome, EpisodeStatus,
    ThumbnailPrompt,
};

pub struct GenerationService {
    store: Store,
    model: Option<Arc<dyn ChatModel>>,
}

impl GenerationService {
    pub fn new(store: Store, model: Option<Arc<dyn ChatModel>>) -> Self {
        Self { store, model }
    }

    fn model(&self) -> Result<Arc<dyn ChatModel>, StudioError> {
        self.model.clone().ok_or_else(|| {
            StudioError::Configuration("Generation model is not configured".to_string())
        })
    }

    /// Generate a new canonical script draft. The episode sits in
    /// GENERATING for the duration and lands in PENDING_REVIEW; a model
    /// failure puts it back in DRAFT.
    pub async fn generate_script(&self, episode_id: &str) -> Result<script::Model, StudioError> {
        let model = self.model()?;
        let episode = self
            .store
            .get_episode(episode_id)
            .await?
            .ok_or_else(|| StudioError::episode_not_found(episode_id))?;

        self.store
            .set_episode_status(episode_id, EpisodeStatus::Generating)
            .await?;

        let prompt = constants::script_prompt(
            &episode.series,
            &episode.title,
            episode.premise.as_deref().unwrap_or(""),
        );

        let content = match model.complete(&prompt).await {
            Ok(content) => content,
            Err(e) => {
                self.store
                    .set_episode_status(episode_id, EpisodeStatus::Draft)
                    .await?;
                return Err(StudioError::provider("Generation", e));
            }
        };

        let stored = self
            .store
            .insert_canonical_script(episode_id, &content, Some(model.model_name()))
            .await?;
        self.store
            .set_episode_status(episode_id, EpisodeStatus::PendingReview)
            .await?;

        info!(
            "Generated script v{} for episode {} ({} chars)",
            stored.version,
            episode_id,
            stored.content.len()
        );
        metrics::counter!("scripts_generated_total").increment(1);
        Ok(stored)
    }

    /// Adapt the canonical script into platform cuts. Every requested
    /// format produces an outcome: created, skipped (unknown tag or
    /// already present), or failed. One bad format never aborts the rest.
    pub async fn generate_cuts(
        &self,
        episode_id: &str,
        formats: Option<Vec<String>>,
    ) -> Result<Vec<CutOutcome>, StudioError> {
        let model = self.model()?;
        self.store
            .get_episode(episode_id)
            .await?
            .ok_or_else(|| StudioError::episode_not_found(episode_id))?;

        let canonical = self
            .store
            .canonical_script(episode_id)
            .await?
            .ok_or_else(|| {
                StudioError::NotFound(format!("Episode {} has no script", episode_id))
            })?;

        let requested: Vec<String> = formats.unwrap_or_else(|| {
            CutFormat::ALL.iter().map(|f| f.as_str().to_string()).collect()
        });

        let mut outcomes = Vec::with_capacity(requested.len());
        for raw in requested {
            let format = match raw.parse::<CutFormat>() {
                Ok(format) => format,
                Err(reason) => {
                    outcomes.push(CutOutcome::Skipped { format: raw, reason });
                    continue;
                }
            };

            if self.store.cut_exists_for_format(episode_id, format).await? {
                outcomes.push(CutOutcome::Skipped {
                    format: format.as_str().to_string(),
                    reason: "cut already exists for this format".to_string(),
                });
                continue;
            }

            let prompt = constants::cut_prompt(
                format.display_name(),
                format.duration_target(),
                format.specs(),
                &canonical.content,
            );

            match model.complete(&prompt).await {
                Ok(adapted) => {
                    let variant = self
                        .store
                        .insert_script_variant(episode_id, &adapted, Some(model.model_name()))
                        .await?;
                    let cut = self.store.create_cut(episode_id, &variant.id, format).await?;
                    outcomes.push(CutOutcome::Created {
                        format,
                        cut_id: cut.id,
                        script_id: variant.id,
                        duration_target: format.duration_target(),
                    });
                }
                Err(e) => {
                    warn!("Cut generation failed for {}: {}", format, e);
                    outcomes.push(CutOutcome::Failed {
                        format,
                        error: e.to_string(),
                    });
                }
            }
        }

        let created = outcomes.iter().filter(|o| o.is_created()).count();
        info!(
            "Generated {}/{} cuts for episode {}",
            created,
            outcomes.len(),
            episode_id
        );
        Ok(outcomes)
    }

    /// Generate B-roll shot prompts and a thumbnail concept as PENDING
    /// asset placeholders. Each kind reports its own outcome; a malformed
    /// completion for one kind does not lose the other.
    pub async fn generate_asset_prompts(
        &self,
        episode_id: &str,
    ) -> Result<Vec<AssetPromptOutcome>, StudioError> {
        let model = self.model()?;
        let episode = self
            .store
            .get_episode(episode_id)
            .await?
            .ok_or_else(|| StudioError::episode_not_found(episode_id))?;

        let canonical = self
            .store
            .canonical_script(episode_id)
            .await?
            .ok_or_else(|| {
                StudioError::NotFound(format!("Episode {} has no script", episode_id))
            })?;

        let mut outcomes = Vec::with_capacity(2);

        let broll_prompt = constants::broll_prompt(&canonical.content);
        outcomes.push(match model.complete(&broll_prompt).await {
            Ok(raw) => self.store_broll(episode_id, &raw).await?,
            Err(e) => AssetPromptOutcome::ModelFailed {
                kind: AssetKind::Broll,
                error: e.to_string(),
            },
        });

        let thumb_prompt = constants::thumbnail_prompt(
            &episode.title,
            episode.premise.as_deref().unwrap_or(""),
        );
        outcomes.push(match model.complete(&thumb_prompt).await {
            Ok(raw) => self.store_thumbnail(episode_id, &raw).await?,
            Err(e) => AssetPromptOutcome::ModelFailed {
                kind: AssetKind::Thumbnail,
                error: e.to_string(),
            },
        });

        Ok(outcomes)
    }

    async fn store_broll(
        &self,
        episode_id: &str,
        raw: &str,
    ) -> Result<AssetPromptOutcome, StudioError> {
        let cleaned = constants::strip_code_fences(raw);
        let prompts: Vec<BrollPrompt> = match serde_json::from_str(&cleaned) {
            Ok(prompts) => prompts,
            Err(e) => {
                warn!("B-roll completion did not parse: {}", e);
                return Ok(AssetPromptOutcome::ParseFailed {
                    kind: AssetKind::Broll,
                    error: e.to_string(),
                });
            }
        };

        let mut asset_ids = Vec::with_capacity(prompts.len());
        for item in &prompts {
            let serialized = serde_json::to_string(item)
                .map_err(|e| StudioError::Internal(e.to_string()))?;
            let asset = self
                .store
                .create_pending_asset(episode_id, AssetKind::Broll, &serialized)
                .await?;
            asset_ids.push(asset.id);
        }

        info!(
            "Stored {} B-roll prompt(s) for episode {}",
            asset_ids.len(),
            episode_id
        );
        Ok(AssetPromptOutcome::Created {
            kind: AssetKind::Broll,
            asset_ids,
        })
    }

    async fn store_thumbnail(
        &self,
        episode_id: &str,
        raw: &str,
    ) -> Result<AssetPromptOutcome, StudioError> {
        let cleaned = constants::strip_code_fences(raw);
        let concept: ThumbnailPrompt = match serde_json::from_str(&cleaned) {
            Ok(concept) => concept,
            Err(e) => {
                warn!("Thumbnail completion did not parse: {}", e);
                return Ok(AssetPromptOutcome::ParseFailed {
                    kind: AssetKind::Thumbnail,
                    error: e.to_string(),
                });
            }
        };

        let serialized =
            serde_json::to_string(&concept).map_err(|e| StudioError::Internal(e.to_string()))?;
        let asset = self
            .store
            .create_pending_asset(episode_id, AssetKind::Thumbnail, &serialized)
            .await?;

        Ok(AssetPromptOutcome::Created {
            kind: AssetKind::Thumbnail,
            asset_ids: vec![asset.id],
        })
    }
}
