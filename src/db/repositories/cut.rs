use crate::entities::{cut, prelude::*};
use crate::models::{CutFormat, CutStatus};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

/// Repository for platform cuts.
pub struct CutRepository {
    conn: DatabaseConnection,
}

impl CutRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        episode_id: &str,
        script_id: &str,
        format: CutFormat,
    ) -> Result<cut::Model> {
        let now = super::now_ts();
        let active = cut::ActiveModel {
            id: Set(super::new_id()),
            episode_id: Set(episode_id.to_string()),
            script_id: Set(Some(script_id.to_string())),
            format: Set(format.as_str().to_string()),
            status: Set(CutStatus::Draft.as_str().to_string()),
            duration_target: Set(format.duration_target()),
            video_url: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };
        Ok(Cut::insert(active).exec_with_returning(&self.conn).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<cut::Model>> {
        Ok(Cut::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn list_for_episode(&self, episode_id: &str) -> Result<Vec<cut::Model>> {
        Ok(Cut::find()
            .filter(cut::Column::EpisodeId.eq(episode_id))
            .order_by_asc(cut::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    pub async fn exists_for_format(&self, episode_id: &str, format: CutFormat) -> Result<bool> {
        let count = Cut::find()
            .filter(cut::Column::EpisodeId.eq(episode_id))
            .filter(cut::Column::Format.eq(format.as_str()))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn set_status(&self, id: &str, status: CutStatus) -> Result<()> {
        Cut::update_many()
            .col_expr(
                cut::Column::Status,
                sea_orm::sea_query::Expr::value(status.as_str()),
            )
            .col_expr(
                cut::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(super::now_ts()),
            )
            .filter(cut::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    /// Mark the cut RENDERED and attach the stored video URL.
    pub async fn set_rendered(&self, id: &str, video_url: &str) -> Result<()> {
        Cut::update_many()
            .col_expr(
                cut::Column::Status,
                sea_orm::sea_query::Expr::value(CutStatus::Rendered.as_str()),
            )
            .col_expr(
                cut::Column::VideoUrl,
                sea_orm::sea_query::Expr::value(video_url),
            )
            .col_expr(
                cut::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(super::now_ts()),
            )
            .filter(cut::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
