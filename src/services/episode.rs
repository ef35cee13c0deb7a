//! Episode lifecycle: CRUD, publish gating, and the aggregated detail
//! view the API and CLI both render.

use tracing::info;

use super::StudioError;
use crate::db::Store;
use crate::entities::{asset, cut, episode, script};
use crate::models::{AssetStatus, EpisodeStatus};

/// Everything attached to one episode.
#[derive(Debug, Clone)]
pub struct EpisodeDetail {
    pub episode: episode::Model,
    pub scripts: Vec<script::Model>,
    pub cuts: Vec<cut::Model>,
    pub assets: Vec<asset::Model>,
}

pub struct EpisodeService {
    store: Store,
}

impl EpisodeService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        series: &str,
        episode_number: i32,
        title: &str,
        premise: Option<&str>,
        publish_date_target: Option<&str>,
    ) -> Result<episode::Model, StudioError> {
        if title.trim().is_empty() {
            return Err(StudioError::Validation("Title cannot be empty".to_string()));
        }
        if series.trim().is_empty() {
            return Err(StudioError::Validation(
                "Series cannot be empty".to_string(),
            ));
        }
        if episode_number < 1 {
            return Err(StudioError::Validation(
                "Episode number must be >= 1".to_string(),
            ));
        }

        Ok(self
            .store
            .create_episode(series, episode_number, title, premise, publish_date_target)
            .await?)
    }

    pub async fn list(
        &self,
        series: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<episode::Model>, StudioError> {
        if let Some(status) = status {
            status
                .parse::<EpisodeStatus>()
                .map_err(StudioError::Validation)?;
        }
        Ok(self.store.list_episodes(series, status).await?)
    }

    pub async fn get(&self, id: &str) -> Result<episode::Model, StudioError> {
        self.store
            .get_episode(id)
            .await?
            .ok_or_else(|| StudioError::episode_not_found(id))
    }

    pub async fn detail(&self, id: &str) -> Result<EpisodeDetail, StudioError> {
        let episode = self.get(id).await?;
        let scripts = self.store.list_scripts(id).await?;
        let cuts = self.store.list_cuts(id).await?;
        let assets = self.store.list_assets(id).await?;
        Ok(EpisodeDetail {
            episode,
            scripts,
            cuts,
            assets,
        })
    }

    /// Operator override of the lifecycle status.
    pub async fn update_status(
        &self,
        id: &str,
        status: EpisodeStatus,
    ) -> Result<episode::Model, StudioError> {
        self.get(id).await?;
        self.store.set_episode_status(id, status).await?;
        info!("Episode {} status set to {}", id, status);
        self.get(id).await
    }

    /// Publishing requires a canonical script and no renders mid-flight.
    /// The external video id, when given, is recorded on the episode.
    pub async fn publish(
        &self,
        id: &str,
        external_video_id: Option<&str>,
    ) -> Result<episode::Model, StudioError> {
        let episode = self.get(id).await?;
        if episode.status == EpisodeStatus::Published.as_str() {
            return Ok(episode);
        }

        if self.store.canonical_script(id).await?.is_none() {
            return Err(StudioError::Validation(format!(
                "Episode {} has no script to publish",
                id
            )));
        }

        let assets = self.store.list_assets(id).await?;
        let in_flight = assets
            .iter()
            .filter(|a| a.status == AssetStatus::Processing.as_str())
            .count();
        if in_flight > 0 {
            return Err(StudioError::Conflict(format!(
                "{} render(s) still processing for episode {}",
                in_flight, id
            )));
        }

        self.store.publish_episode(id, external_video_id).await?;
        info!("Published episode {}", id);
        self.get(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StudioError> {
        if !self.store.remove_episode(id).await? {
            return Err(StudioError::episode_not_found(id));
        }
        info!("Deleted episode {}", id);
        Ok(())
    }
}
