use sea_orm::entity::prelude::*;

/// A versioned script draft. At most one row per episode carries
/// `canonical = true`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "script")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub episode_id: String,
    pub version: i32,
    pub content: String,
    pub canonical: bool,
    pub model: Option<String>,
    pub created_at: String,
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
    #[sea_orm(has_many = "super::cut::Entity")]
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
