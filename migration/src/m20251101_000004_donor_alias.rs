use sea_orm_migration::{prelude::*, schema::*};

static IDX_DONOR_ALIAS_NAME: &str = "idx-donor_alias-name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DonorAlias::Table)
                    .if_not_exists()
                    .col(pk_auto(DonorAlias::Id))
                    .col(string(DonorAlias::Name))
                    .col(text_null(DonorAlias::Note))
                    .col(timestamp(DonorAlias::LastEditedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DONOR_ALIAS_NAME)
                    .table(DonorAlias::Table)
                    .col(DonorAlias::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DONOR_ALIAS_NAME)
                    .table(DonorAlias::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DonorAlias::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DonorAlias {
    Table,
    Id,
    Name,
    Note,
    LastEditedAt,
}
