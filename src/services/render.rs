//! Render submission: validates the target, builds the provider payload,
//! submits the job, and records a PROCESSING asset carrying the provider's
//! job id.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use super::StudioError;
use crate::clients::{HeyGenApi, HeyGenRenderSpec, SoraApi, SoraCreateVideo};
use crate::config::HeyGenProviderConfig;
use crate::constants;
use crate::db::Store;
use crate::models::{
    AspectRatio, AssetKind, AvatarRef, CutStatus, Provider, RenderPhase, RenderReceipt,
    SoraDuration,
};

#[derive(Debug, Clone)]
pub struct SoraRenderRequest {
    pub episode_id: String,
    pub cut_id: Option<String>,
    /// Explicit prompt. When absent the prompt is derived from the script.
    pub prompt: Option<String>,
    pub duration: SoraDuration,
    pub aspect: AspectRatio,
    /// Model override (e.g. "sora-2-pro"); the configured model otherwise.
    pub model: Option<String>,
    /// Optional reference image passed through to the provider.
    pub input_reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HeyGenRenderRequest {
    pub episode_id: String,
    pub cut_id: Option<String>,
    /// Explicit narration text. When absent the script is used verbatim.
    pub script_text: Option<String>,
    pub avatar: Option<AvatarRef>,
    pub aspect: AspectRatio,
}

type LockKey = (String, Option<String>, Provider);

/// In-process submission locks, one per (episode, cut, provider) target.
/// A held lock means a submission is mid-flight; the DB check alone cannot
/// see those because the asset row is only written after the provider
/// accepts the job.
#[derive(Clone, Default)]
pub struct RenderLocks {
    inner: Arc<Mutex<HashSet<LockKey>>>,
}

impl RenderLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn acquire(
        &self,
        episode_id: &str,
        cut_id: Option<&str>,
        provider: Provider,
    ) -> Option<RenderLockGuard> {
        let key = (
            episode_id.to_string(),
            cut_id.map(|s| s.to_string()),
            provider,
        );
        let mut held = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if held.insert(key.clone()) {
            Some(RenderLockGuard {
                inner: self.inner.clone(),
                key,
            })
        } else {
            None
        }
    }
}

struct RenderLockGuard {
    inner: Arc<Mutex<HashSet<LockKey>>>,
    key: LockKey,
}

impl Drop for RenderLockGuard {
    fn drop(&mut self) {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&self.key);
    }
}

pub struct RenderService {
    store: Store,
    sora: Option<Arc<dyn SoraApi>>,
    heygen: Option<Arc<dyn HeyGenApi>>,
    heygen_config: HeyGenProviderConfig,
    locks: RenderLocks,
}

impl RenderService {
    pub fn new(
        store: Store,
        sora: Option<Arc<dyn SoraApi>>,
        heygen: Option<Arc<dyn HeyGenApi>>,
        heygen_config: HeyGenProviderConfig,
    ) -> Self {
        Self {
            store,
            sora,
            heygen,
            heygen_config,
            locks: RenderLocks::new(),
        }
    }

    pub async fn render_sora(&self, req: SoraRenderRequest) -> Result<RenderReceipt, StudioError> {
        let client = self
            .sora
            .clone()
            .ok_or_else(|| StudioError::Configuration("Sora is not configured".to_string()))?;

        self.validate_target(&req.episode_id, req.cut_id.as_deref())
            .await?;

        let _lock = self
            .claim_target(&req.episode_id, req.cut_id.as_deref(), Provider::Sora)
            .await?;

        let prompt = match req.prompt {
            Some(prompt) if !prompt.trim().is_empty() => prompt,
            _ => {
                let script = self
                    .resolve_script(&req.episode_id, req.cut_id.as_deref())
                    .await?;
                constants::default_sora_prompt(&script)
            }
        };

        let job_id = client
            .create_video(&SoraCreateVideo {
                prompt: prompt.clone(),
                seconds: req.duration.as_str().to_string(),
                size: req.aspect.sora_size().to_string(),
                model: req.model,
                input_reference: req.input_reference,
            })
            .await
            .map_err(|e| StudioError::provider("Sora", e))?;

        let asset = self
            .store
            .create_processing_asset(
                &req.episode_id,
                req.cut_id.as_deref(),
                AssetKind::Sora,
                Provider::Sora,
                &job_id,
                &prompt,
            )
            .await?;

        if let Some(cut_id) = &req.cut_id {
            self.store.set_cut_status(cut_id, CutStatus::Rendering).await?;
        }

        info!(
            "Submitted Sora render {} for episode {} (asset {})",
            job_id, req.episode_id, asset.id
        );
        metrics::counter!("renders_submitted_total", "provider" => "sora").increment(1);

        let poll_hint = format!("video status {}", job_id);
        Ok(RenderReceipt {
            provider: Provider::Sora,
            video_id: job_id,
            asset_id: asset.id,
            status: RenderPhase::Processing,
            poll_hint,
        })
    }

    pub async fn render_heygen(
        &self,
        req: HeyGenRenderRequest,
    ) -> Result<RenderReceipt, StudioError> {
        let client = self
            .heygen
            .clone()
            .ok_or_else(|| StudioError::Configuration("HeyGen is not configured".to_string()))?;

        self.validate_target(&req.episode_id, req.cut_id.as_deref())
            .await?;

        let _lock = self
            .claim_target(&req.episode_id, req.cut_id.as_deref(), Provider::Heygen)
            .await?;

        let script_text = match req.script_text {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                self.resolve_script(&req.episode_id, req.cut_id.as_deref())
                    .await?
            }
        };

        let (avatar_id, voice_id) = self.resolve_avatar(req.avatar).await?;
        let (width, height) = req.aspect.heygen_dimension();

        let spec = HeyGenRenderSpec {
            script_text: script_text.clone(),
            avatar_id,
            voice_id,
            background_color: self.heygen_config.default_background_color.clone(),
            width,
            height,
        };

        let job_id = client
            .generate(&spec)
            .await
            .map_err(|e| StudioError::provider("HeyGen", e))?;

        let asset = self
            .store
            .create_processing_asset(
                &req.episode_id,
                req.cut_id.as_deref(),
                AssetKind::Heygen,
                Provider::Heygen,
                &job_id,
                &script_text,
            )
            .await?;

        if let Some(cut_id) = &req.cut_id {
            self.store.set_cut_status(cut_id, CutStatus::Rendering).await?;
        }

        info!(
            "Submitted HeyGen render {} for episode {} (asset {})",
            job_id, req.episode_id, asset.id
        );
        metrics::counter!("renders_submitted_total", "provider" => "heygen").increment(1);

        let poll_hint = format!("video status {}", job_id);
        Ok(RenderReceipt {
            provider: Provider::Heygen,
            video_id: job_id,
            asset_id: asset.id,
            status: RenderPhase::Processing,
            poll_hint,
        })
    }

    async fn validate_target(
        &self,
        episode_id: &str,
        cut_id: Option<&str>,
    ) -> Result<(), StudioError> {
        self.store
            .get_episode(episode_id)
            .await?
            .ok_or_else(|| StudioError::episode_not_found(episode_id))?;

        if let Some(cut_id) = cut_id {
            let cut = self
                .store
                .get_cut(cut_id)
                .await?
                .ok_or_else(|| StudioError::NotFound(format!("Cut {} not found", cut_id)))?;
            if cut.episode_id != episode_id {
                return Err(StudioError::Validation(format!(
                    "Cut {} does not belong to episode {}",
                    cut_id, episode_id
                )));
            }
        }
        Ok(())
    }

    /// Both gates must pass: the in-process lock catches submissions that
    /// have not produced an asset row yet, the DB check catches earlier
    /// jobs still PROCESSING.
    async fn claim_target(
        &self,
        episode_id: &str,
        cut_id: Option<&str>,
        provider: Provider,
    ) -> Result<RenderLockGuard, StudioError> {
        let guard = self
            .locks
            .acquire(episode_id, cut_id, provider)
            .ok_or_else(|| {
                StudioError::Conflict(format!(
                    "A {} render is already being submitted for this target",
                    provider
                ))
            })?;

        if self
            .store
            .has_processing_asset_for_target(episode_id, cut_id, provider)
            .await?
        {
            warn!(
                "Rejected duplicate {} render for episode {} cut {:?}",
                provider, episode_id, cut_id
            );
            return Err(StudioError::Conflict(format!(
                "A {} render is already in flight for this target",
                provider
            )));
        }

        Ok(guard)
    }

    /// The cut's own script wins; otherwise the episode's canonical script.
    async fn resolve_script(
        &self,
        episode_id: &str,
        cut_id: Option<&str>,
    ) -> Result<String, StudioError> {
        if let Some(cut_id) = cut_id
            && let Some(cut) = self.store.get_cut(cut_id).await?
            && let Some(script_id) = cut.script_id
            && let Some(script) = self.store.get_script(&script_id).await?
        {
            return Ok(script.content);
        }

        self.store
            .canonical_script(episode_id)
            .await?
            .map(|s| s.content)
            .ok_or_else(|| {
                StudioError::NotFound(format!("Episode {} has no script", episode_id))
            })
    }

    /// Local avatars fail closed: an unknown id falls back to the default
    /// avatar record rather than being passed through to the provider.
    async fn resolve_avatar(
        &self,
        avatar: Option<AvatarRef>,
    ) -> Result<(String, String), StudioError> {
        let default_voice = self.heygen_config.default_voice_id.clone();

        match avatar {
            Some(AvatarRef::Provider(id)) => Ok((id, default_voice)),
            Some(AvatarRef::Local(id)) => {
                if let Some(record) = self.store.get_avatar(&id).await? {
                    let voice = record.voice_id.unwrap_or(default_voice);
                    return Ok((record.provider_avatar_id, voice));
                }
                warn!("Avatar {} not found, falling back to default", id);
                self.default_avatar(default_voice).await
            }
            None => self.default_avatar(default_voice).await,
        }
    }

    async fn default_avatar(&self, default_voice: String) -> Result<(String, String), StudioError> {
        let record = self.store.get_default_avatar().await?.ok_or_else(|| {
            StudioError::Configuration("No default avatar is configured".to_string())
        })?;
        let voice = record.voice_id.unwrap_or(default_voice);
        Ok((record.provider_avatar_id, voice))
    }
}
