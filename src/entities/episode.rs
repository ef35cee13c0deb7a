use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "episode")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub series: String,
    pub episode_number: i32,
    pub title: String,
    pub premise: Option<String>,
    pub status: String,
    /// Target date the episode is being produced for, RFC3339.
    pub publish_date_target: Option<String>,
    pub published_at: Option<String>,
    /// Id of the published video on the destination platform.
    pub external_video_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::script::Entity")]
    Script,
    #[sea_orm(has_many = "super::cut::Entity")]
    Cut,
    #[sea_orm(has_many = "super::asset::Entity")]
    Asset,
}

impl Related<super::script::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Script.def()
    }
}

impl Related<super::cut::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cut.def()
    }
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
