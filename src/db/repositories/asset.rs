use crate::entities::{asset, prelude::*};
use crate::models::{AssetKind, AssetStatus, Provider};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

/// Repository for media assets. Render rows are keyed to their external
/// jobs through `provider_job_id`; the poller never scans prompts.
pub struct AssetRepository {
    conn: DatabaseConnection,
}

impl AssetRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a render asset. The provider job already exists by the time
    /// this runs, so the row starts at PROCESSING.
    pub async fn create_processing(
        &self,
        episode_id: &str,
        cut_id: Option<&str>,
        kind: AssetKind,
        provider: Provider,
        provider_job_id: &str,
        prompt: &str,
    ) -> Result<asset::Model> {
        let now = super::now_ts();
        let active = asset::ActiveModel {
            id: Set(super::new_id()),
            episode_id: Set(episode_id.to_string()),
            cut_id: Set(cut_id.map(|s| s.to_string())),
            kind: Set(kind.as_str().to_string()),
            status: Set(AssetStatus::Processing.as_str().to_string()),
            provider: Set(Some(provider.as_str().to_string())),
            provider_job_id: Set(Some(provider_job_id.to_string())),
            prompt: Set(Some(prompt.to_string())),
            url: Set(None),
            error: Set(None),
            error_code: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };
        let inserted = Asset::insert(active).exec_with_returning(&self.conn).await?;
        info!(
            "Tracking {} job {} as asset {}",
            provider, provider_job_id, inserted.id
        );
        Ok(inserted)
    }

    /// Insert a prompt placeholder (B-roll shot, thumbnail concept).
    /// No provider job exists yet, so the row starts at PENDING.
    pub async fn create_pending(
        &self,
        episode_id: &str,
        kind: AssetKind,
        prompt: &str,
    ) -> Result<asset::Model> {
        let now = super::now_ts();
        let active = asset::ActiveModel {
            id: Set(super::new_id()),
            episode_id: Set(episode_id.to_string()),
            cut_id: Set(None),
            kind: Set(kind.as_str().to_string()),
            status: Set(AssetStatus::Pending.as_str().to_string()),
            provider: Set(None),
            provider_job_id: Set(None),
            prompt: Set(Some(prompt.to_string())),
            url: Set(None),
            error: Set(None),
            error_code: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };
        Ok(Asset::insert(active).exec_with_returning(&self.conn).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<asset::Model>> {
        Ok(Asset::find_by_id(id).one(&self.conn).await?)
    }

    /// Provider job ids are globally unique, so the lookup needs no
    /// provider hint.
    pub async fn find_by_job_id(&self, job_id: &str) -> Result<Option<asset::Model>> {
        Ok(Asset::find()
            .filter(asset::Column::ProviderJobId.eq(job_id))
            .one(&self.conn)
            .await?)
    }

    /// True when a PROCESSING render already exists for this target.
    pub async fn has_processing_for_target(
        &self,
        episode_id: &str,
        cut_id: Option<&str>,
        provider: Provider,
    ) -> Result<bool> {
        let mut query = Asset::find()
            .filter(asset::Column::EpisodeId.eq(episode_id))
            .filter(asset::Column::Provider.eq(provider.as_str()))
            .filter(asset::Column::Status.eq(AssetStatus::Processing.as_str()));
        query = match cut_id {
            Some(cut_id) => query.filter(asset::Column::CutId.eq(cut_id)),
            None => query.filter(asset::Column::CutId.is_null()),
        };
        Ok(query.count(&self.conn).await? > 0)
    }

    pub async fn complete(&self, id: &str, url: &str) -> Result<()> {
        Asset::update_many()
            .col_expr(
                asset::Column::Status,
                sea_orm::sea_query::Expr::value(AssetStatus::Completed.as_str()),
            )
            .col_expr(asset::Column::Url, sea_orm::sea_query::Expr::value(url))
            .col_expr(
                asset::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(super::now_ts()),
            )
            .filter(asset::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn fail(&self, id: &str, error: &str, error_code: Option<&str>) -> Result<()> {
        Asset::update_many()
            .col_expr(
                asset::Column::Status,
                sea_orm::sea_query::Expr::value(AssetStatus::Failed.as_str()),
            )
            .col_expr(asset::Column::Error, sea_orm::sea_query::Expr::value(error))
            .col_expr(
                asset::Column::ErrorCode,
                sea_orm::sea_query::Expr::value(error_code),
            )
            .col_expr(
                asset::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(super::now_ts()),
            )
            .filter(asset::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn list_for_episode(&self, episode_id: &str) -> Result<Vec<asset::Model>> {
        Ok(Asset::find()
            .filter(asset::Column::EpisodeId.eq(episode_id))
            .order_by_asc(asset::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_by_status(&self, status: AssetStatus) -> Result<Vec<asset::Model>> {
        Ok(Asset::find()
            .filter(asset::Column::Status.eq(status.as_str()))
            .order_by_asc(asset::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    /// PROCESSING renders whose last update predates the cutoff. These are
    /// jobs the provider stopped answering for; the reaper fails them.
    pub async fn list_stale_processing(&self, cutoff: &str) -> Result<Vec<asset::Model>> {
        Ok(Asset::find()
            .filter(asset::Column::Status.eq(AssetStatus::Processing.as_str()))
            .filter(asset::Column::ProviderJobId.is_not_null())
            .filter(asset::Column::UpdatedAt.lt(cutoff))
            .all(&self.conn)
            .await?)
    }

    /// Refresh updated_at on a still-processing row so the stale reaper
    /// only counts time since the last successful poll.
    pub async fn touch(&self, id: &str) -> Result<()> {
        Asset::update_many()
            .col_expr(
                asset::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(super::now_ts()),
            )
            .filter(asset::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
