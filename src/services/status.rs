//! Status polling and completion. Terminal assets are never re-polled;
//! completed renders are copied into our blob store before the asset is
//! marked COMPLETED, so a stored url always means a playable video.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use super::StudioError;
use crate::clients::{HeyGenApi, ProviderHttpError, SoraApi};
use crate::db::Store;
use crate::models::{AssetStatus, CutStatus, Provider, VideoStatusReport};
use crate::storage::{ObjectStore, video_key};

pub struct StatusService {
    store: Store,
    sora: Option<Arc<dyn SoraApi>>,
    heygen: Option<Arc<dyn HeyGenApi>>,
    blobs: Option<Arc<dyn ObjectStore>>,
}

impl StatusService {
    pub fn new(
        store: Store,
        sora: Option<Arc<dyn SoraApi>>,
        heygen: Option<Arc<dyn HeyGenApi>>,
        blobs: Option<Arc<dyn ObjectStore>>,
    ) -> Self {
        Self {
            store,
            sora,
            heygen,
            blobs,
        }
    }

    /// Poll one provider job and advance the tracked asset. The provider
    /// comes from the asset row, so callers only need the job id.
    /// Idempotent on terminal assets: the stored outcome is returned
    /// without touching the provider.
    pub async fn check(&self, job_id: &str) -> Result<VideoStatusReport, StudioError> {
        let asset = self
            .store
            .find_asset_by_job_id(job_id)
            .await?
            .ok_or_else(|| StudioError::NotFound(format!("No tracked render job {}", job_id)))?;

        let status: AssetStatus = asset.status.parse().map_err(StudioError::Internal)?;
        if status.is_terminal() {
            return Ok(match status {
                AssetStatus::Completed => {
                    VideoStatusReport::completed(asset.url.unwrap_or_default())
                }
                _ => VideoStatusReport::failed(
                    asset.error.unwrap_or_else(|| "Render failed".to_string()),
                    asset.error_code,
                ),
            });
        }

        let provider: Provider = asset
            .provider
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(StudioError::Internal)?;

        match provider {
            Provider::Sora => {
                self.check_sora(&asset.id, &asset.episode_id, asset.cut_id.as_deref(), job_id)
                    .await
            }
            Provider::Heygen => {
                self.check_heygen(&asset.id, &asset.episode_id, asset.cut_id.as_deref(), job_id)
                    .await
            }
        }
    }

    async fn check_sora(
        &self,
        asset_id: &str,
        episode_id: &str,
        cut_id: Option<&str>,
        job_id: &str,
    ) -> Result<VideoStatusReport, StudioError> {
        let client = self
            .sora
            .clone()
            .ok_or_else(|| StudioError::Configuration("Sora is not configured".to_string()))?;

        let video = match client.get_video(job_id).await {
            Ok(video) => video,
            Err(e) => return self.fail_from_http(asset_id, cut_id, "Sora", e).await,
        };

        match video.status.as_str() {
            "completed" => {
                let bytes = client
                    .download_content(job_id)
                    .await
                    .map_err(|e| StudioError::provider("Sora", e))?;
                let url = self.persist(episode_id, asset_id, cut_id, bytes).await?;
                metrics::counter!("renders_completed_total", "provider" => "sora").increment(1);
                Ok(VideoStatusReport::completed(url))
            }
            "failed" => {
                let (message, code) = video
                    .error
                    .map(|e| {
                        (
                            e.message.unwrap_or_else(|| "Render failed".to_string()),
                            e.code,
                        )
                    })
                    .unwrap_or_else(|| ("Render failed".to_string(), None));
                self.record_failure(asset_id, cut_id, &message, code.as_deref())
                    .await?;
                Ok(VideoStatusReport::failed(message, code))
            }
            _ => {
                self.store.touch_asset(asset_id).await?;
                Ok(VideoStatusReport::processing())
            }
        }
    }

    async fn check_heygen(
        &self,
        asset_id: &str,
        episode_id: &str,
        cut_id: Option<&str>,
        job_id: &str,
    ) -> Result<VideoStatusReport, StudioError> {
        let client = self
            .heygen
            .clone()
            .ok_or_else(|| StudioError::Configuration("HeyGen is not configured".to_string()))?;

        let status = match client.status(job_id).await {
            Ok(status) => status,
            Err(e) => return self.fail_from_http(asset_id, cut_id, "HeyGen", e).await,
        };

        match status.status.as_str() {
            "completed" => {
                let source_url = status.video_url.ok_or_else(|| {
                    StudioError::provider("HeyGen", "completed job has no video_url")
                })?;
                let bytes = client
                    .fetch_video(&source_url)
                    .await
                    .map_err(|e| StudioError::provider("HeyGen", e))?;
                let url = self.persist(episode_id, asset_id, cut_id, bytes).await?;
                metrics::counter!("renders_completed_total", "provider" => "heygen").increment(1);
                Ok(VideoStatusReport::completed(url))
            }
            "failed" | "error" => {
                let (message, code) = status
                    .error
                    .map(|e| {
                        (
                            e.message.unwrap_or_else(|| "Render failed".to_string()),
                            e.code.map(|c| c.to_string()),
                        )
                    })
                    .unwrap_or_else(|| ("Render failed".to_string(), None));
                self.record_failure(asset_id, cut_id, &message, code.as_deref())
                    .await?;
                Ok(VideoStatusReport::failed(message, code))
            }
            _ => {
                self.store.touch_asset(asset_id).await?;
                Ok(VideoStatusReport::processing())
            }
        }
    }

    /// A non-2xx from a status endpoint is a verdict on the job: the asset
    /// is failed with the response body as the error and the HTTP code as
    /// the error code. Transport errors still propagate so a flaky network
    /// cannot fail a render.
    async fn fail_from_http(
        &self,
        asset_id: &str,
        cut_id: Option<&str>,
        service: &'static str,
        err: anyhow::Error,
    ) -> Result<VideoStatusReport, StudioError> {
        match err.downcast::<ProviderHttpError>() {
            Ok(http) => {
                let code = http.code.to_string();
                let message = if http.body.is_empty() {
                    format!("HTTP {}", http.code)
                } else {
                    http.body
                };
                self.record_failure(asset_id, cut_id, &message, Some(&code))
                    .await?;
                Ok(VideoStatusReport::failed(message, Some(code)))
            }
            Err(other) => Err(StudioError::provider(service, other)),
        }
    }

    /// Copy the finished video into our bucket, then flip the asset and
    /// its cut. The DB write happens only after the upload succeeds.
    async fn persist(
        &self,
        episode_id: &str,
        asset_id: &str,
        cut_id: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, StudioError> {
        let blobs = self
            .blobs
            .clone()
            .ok_or_else(|| StudioError::Configuration("Storage is not configured".to_string()))?;

        let key = video_key(episode_id, asset_id);
        let url = blobs
            .put_bytes(&key, bytes, "video/mp4")
            .await
            .map_err(|e| StudioError::Internal(e.to_string()))?;

        self.store.complete_asset(asset_id, &url).await?;
        if let Some(cut_id) = cut_id {
            self.store.set_cut_rendered(cut_id, &url).await?;
        }

        info!("Asset {} completed -> {}", asset_id, url);
        Ok(url)
    }

    async fn record_failure(
        &self,
        asset_id: &str,
        cut_id: Option<&str>,
        message: &str,
        code: Option<&str>,
    ) -> Result<(), StudioError> {
        self.store.fail_asset(asset_id, message, code).await?;
        if let Some(cut_id) = cut_id {
            self.store.set_cut_status(cut_id, CutStatus::Failed).await?;
        }
        warn!("Asset {} failed: {}", asset_id, message);
        metrics::counter!("renders_failed_total").increment(1);
        Ok(())
    }

    /// Poll every PROCESSING render once. Provider errors on individual
    /// jobs are logged and skipped so one flaky job cannot stall the sweep.
    pub async fn poll_processing(&self) -> Result<usize, StudioError> {
        let processing = self
            .store
            .list_assets_by_status(AssetStatus::Processing)
            .await?;
        let mut advanced = 0;

        for asset in processing {
            let Some(job_id) = &asset.provider_job_id else {
                continue;
            };
            match self.check(job_id).await {
                Ok(report) if report.status != crate::models::RenderPhase::Processing => {
                    advanced += 1;
                }
                Ok(_) => {}
                Err(e) => warn!("Poll failed for job {}: {}", job_id, e),
            }
        }

        Ok(advanced)
    }

    /// Fail PROCESSING renders whose last update is older than the TTL.
    pub async fn sweep_stale(&self, stale_after_minutes: u32) -> Result<usize, StudioError> {
        let cutoff = (Utc::now() - Duration::minutes(i64::from(stale_after_minutes))).to_rfc3339();
        let stale = self.store.list_stale_processing_assets(&cutoff).await?;
        let count = stale.len();

        for asset in stale {
            let message = format!(
                "Render exceeded {} minutes without a status change",
                stale_after_minutes
            );
            self.record_failure(&asset.id, asset.cut_id.as_deref(), &message, Some("STALE_TIMEOUT"))
                .await?;
        }

        if count > 0 {
            warn!("Stale reaper failed {} render(s)", count);
        }
        Ok(count)
    }
}
