use crate::entities::{avatar, prelude::*};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

/// Repository for curated avatar presets.
pub struct AvatarRepository {
    conn: DatabaseConnection,
}

impl AvatarRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        name: &str,
        provider_avatar_id: &str,
        voice_id: Option<&str>,
        is_default: bool,
    ) -> Result<avatar::Model> {
        let active = avatar::ActiveModel {
            id: Set(super::new_id()),
            name: Set(name.to_string()),
            provider_avatar_id: Set(provider_avatar_id.to_string()),
            voice_id: Set(voice_id.map(|s| s.to_string())),
            is_default: Set(is_default),
            created_at: Set(super::now_ts()),
        };
        Ok(Avatar::insert(active).exec_with_returning(&self.conn).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<avatar::Model>> {
        Ok(Avatar::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_default(&self) -> Result<Option<avatar::Model>> {
        Ok(Avatar::find()
            .filter(avatar::Column::IsDefault.eq(true))
            .one(&self.conn)
            .await?)
    }

    pub async fn list(&self) -> Result<Vec<avatar::Model>> {
        Ok(Avatar::find()
            .order_by_asc(avatar::Column::Name)
            .all(&self.conn)
            .await?)
    }
}
