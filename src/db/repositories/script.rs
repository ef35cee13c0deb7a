use crate::entities::{prelude::*, script};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::info;

/// Repository for script drafts. Canonical selection is a single-row
/// invariant per episode, maintained inside a transaction.
pub struct ScriptRepository {
    conn: DatabaseConnection,
}

impl ScriptRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new draft as the canonical script for the episode,
    /// clearing the flag on every prior version.
    pub async fn insert_canonical(
        &self,
        episode_id: &str,
        content: &str,
        model: Option<&str>,
    ) -> Result<script::Model> {
        let txn = self.conn.begin().await?;

        let latest: Option<i32> = Script::find()
            .filter(script::Column::EpisodeId.eq(episode_id))
            .order_by_desc(script::Column::Version)
            .limit(1)
            .all(&txn)
            .await?
            .into_iter()
            .next()
            .map(|m| m.version);
        let version = latest.unwrap_or(0) + 1;

        Script::update_many()
            .col_expr(
                script::Column::Canonical,
                sea_orm::sea_query::Expr::value(false),
            )
            .filter(script::Column::EpisodeId.eq(episode_id))
            .exec(&txn)
            .await?;

        let active = script::ActiveModel {
            id: Set(super::new_id()),
            episode_id: Set(episode_id.to_string()),
            version: Set(version),
            content: Set(content.to_string()),
            canonical: Set(true),
            model: Set(model.map(|s| s.to_string())),
            created_at: Set(super::now_ts()),
        };
        let inserted = Script::insert(active).exec_with_returning(&txn).await?;

        txn.commit().await?;
        info!(
            "Stored script v{} for episode {} ({} chars)",
            version,
            episode_id,
            inserted.content.len()
        );
        Ok(inserted)
    }

    /// Insert a non-canonical variant (a per-format cut adaptation).
    /// The canonical flag on existing versions is left alone.
    pub async fn insert_variant(
        &self,
        episode_id: &str,
        content: &str,
        model: Option<&str>,
    ) -> Result<script::Model> {
        let latest: Option<i32> = Script::find()
            .filter(script::Column::EpisodeId.eq(episode_id))
            .order_by_desc(script::Column::Version)
            .limit(1)
            .all(&self.conn)
            .await?
            .into_iter()
            .next()
            .map(|m| m.version);

        let active = script::ActiveModel {
            id: Set(super::new_id()),
            episode_id: Set(episode_id.to_string()),
            version: Set(latest.unwrap_or(0) + 1),
            content: Set(content.to_string()),
            canonical: Set(false),
            model: Set(model.map(|s| s.to_string())),
            created_at: Set(super::now_ts()),
        };
        Ok(Script::insert(active)
            .exec_with_returning(&self.conn)
            .await?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<script::Model>> {
        Ok(Script::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn canonical_for_episode(&self, episode_id: &str) -> Result<Option<script::Model>> {
        Ok(Script::find()
            .filter(script::Column::EpisodeId.eq(episode_id))
            .filter(script::Column::Canonical.eq(true))
            .one(&self.conn)
            .await?)
    }

    pub async fn list_for_episode(&self, episode_id: &str) -> Result<Vec<script::Model>> {
        Ok(Script::find()
            .filter(script::Column::EpisodeId.eq(episode_id))
            .order_by_desc(script::Column::Version)
            .all(&self.conn)
            .await?)
    }
}
