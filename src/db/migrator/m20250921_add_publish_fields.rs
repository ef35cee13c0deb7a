use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    // Fresh databases get these columns from the initial entity-derived
    // schema, so each add is guarded by a has_column probe.
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_column("episode", "publish_date_target").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Episode::Table)
                        .add_column(ColumnDef::new(Episode::PublishDateTarget).text().null())
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_column("episode", "external_video_id").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Episode::Table)
                        .add_column(ColumnDef::new(Episode::ExternalVideoId).text().null())
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Episode::Table)
                    .drop_column(Episode::ExternalVideoId)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Episode::Table)
                    .drop_column(Episode::PublishDateTarget)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Episode {
    Table,
    PublishDateTarget,
    ExternalVideoId,
}
