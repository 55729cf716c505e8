use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ImportJob::Table)
                    .if_not_exists()
                    .col(pk_auto(ImportJob::Id))
                    .col(string(ImportJob::Status))
                    .col(integer(ImportJob::Progress))
                    .col(integer(ImportJob::ProcessedCount))
                    .col(integer(ImportJob::TotalCount))
                    .col(integer(ImportJob::ImportedCount))
                    .col(integer(ImportJob::SkippedCount))
                    .col(integer(ImportJob::DiscardedCount))
                    .col(text_null(ImportJob::Error))
                    .col(timestamp(ImportJob::CreatedAt))
                    .col(timestamp(ImportJob::UpdatedAt))
                    .col(timestamp_null(ImportJob::CompletedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ImportJob::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ImportJob {
    Table,
    Id,
    Status,
    Progress,
    ProcessedCount,
    TotalCount,
    ImportedCount,
    SkippedCount,
    DiscardedCount,
    Error,
    CreatedAt,
    UpdatedAt,
    CompletedAt,
}
