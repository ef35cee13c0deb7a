use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_asset_provider_job_id")
                    .table(Asset::Table)
                    .col(Asset::ProviderJobId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_asset_episode_status")
                    .table(Asset::Table)
                    .col(Asset::EpisodeId)
                    .col(Asset::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_asset_episode_status")
                    .table(Asset::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_asset_provider_job_id")
                    .table(Asset::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Asset {
    Table,
    ProviderJobId,
    EpisodeId,
    Status,
}
