use crate::entities::{episode, prelude::*};
use crate::models::EpisodeStatus;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

/// Repository for episode rows.
pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        series: &str,
        episode_number: i32,
        title: &str,
        premise: Option<&str>,
        publish_date_target: Option<&str>,
    ) -> Result<episode::Model> {
        let now = super::now_ts();
        let model = episode::ActiveModel {
            id: Set(super::new_id()),
            series: Set(series.to_string()),
            episode_number: Set(episode_number),
            title: Set(title.to_string()),
            premise: Set(premise.map(|s| s.to_string())),
            status: Set(EpisodeStatus::Draft.as_str().to_string()),
            publish_date_target: Set(publish_date_target.map(|s| s.to_string())),
            published_at: Set(None),
            external_video_id: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let inserted = Episode::insert(model)
            .exec_with_returning(&self.conn)
            .await?;
        info!("Created episode {} ({})", inserted.id, inserted.title);
        Ok(inserted)
    }

    pub async fn get(&self, id: &str) -> Result<Option<episode::Model>> {
        Ok(Episode::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn list(
        &self,
        series: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<episode::Model>> {
        let mut query = Episode::find();
        if let Some(series) = series {
            query = query.filter(episode::Column::Series.eq(series));
        }
        if let Some(status) = status {
            query = query.filter(episode::Column::Status.eq(status));
        }
        Ok(query
            .order_by_asc(episode::Column::Series)
            .order_by_asc(episode::Column::EpisodeNumber)
            .all(&self.conn)
            .await?)
    }

    pub async fn set_status(&self, id: &str, status: EpisodeStatus) -> Result<()> {
        Episode::update_many()
            .col_expr(
                episode::Column::Status,
                sea_orm::sea_query::Expr::value(status.as_str()),
            )
            .col_expr(
                episode::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(super::now_ts()),
            )
            .filter(episode::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn publish(&self, id: &str, external_video_id: Option<&str>) -> Result<()> {
        let now = super::now_ts();
        let mut update = Episode::update_many()
            .col_expr(
                episode::Column::Status,
                sea_orm::sea_query::Expr::value(EpisodeStatus::Published.as_str()),
            )
            .col_expr(
                episode::Column::PublishedAt,
                sea_orm::sea_query::Expr::value(now.clone()),
            )
            .col_expr(
                episode::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            );
        if let Some(external) = external_video_id {
            update = update.col_expr(
                episode::Column::ExternalVideoId,
                sea_orm::sea_query::Expr::value(external),
            );
        }
        update
            .filter(episode::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> Result<bool> {
        let result = Episode::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
