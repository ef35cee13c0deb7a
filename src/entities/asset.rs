use sea_orm::entity::prelude::*;

/// Media assets: provider renders (SORA, HEYGEN) and generation-prompt
/// placeholders (BROLL, THUMBNAIL). `provider_job_id` holds the external
/// job identifier for render assets and is how status polls find the row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "asset")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub episode_id: String,
    pub cut_id: Option<String>,
    pub kind: String,
    pub status: String,
    pub provider: Option<String>,
    pub provider_job_id: Option<String>,
    pub prompt: Option<String>,
    pub url: Option<String>,
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::episode::Entity",
        from = "Column::EpisodeId",
        to = "super::episode::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Episode,
    #[sea_orm(
        belongs_to = "super::cut::Entity",
        from = "Column::CutId",
        to = "super::cut::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Cut,
}

impl Related<super::episode::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Episode.def()
    }
}

impl Related<super::cut::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cut.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
