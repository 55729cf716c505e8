use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_donor_type::DonorType, m20251101_000004_donor_alias::DonorAlias,
};

static IDX_DONOR_ALIAS_ID: &str = "idx-donor-alias_id";
static FK_DONOR_ALIAS_ID: &str = "fk-donor-alias_id";
static FK_DONOR_DONOR_TYPE_ID: &str = "fk-donor-donor_type_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donor::Table)
                    .if_not_exists()
                    .col(pk_auto(Donor::Id))
                    .col(string_uniq(Donor::Name))
                    .col(integer(Donor::DonorTypeId))
                    .col(integer(Donor::AliasId))
                    .col(string_null(Donor::ExternalDonorId))
                    .col(string_null(Donor::ExternalEntityId))
                    .col(string_null(Donor::Postcode))
                    .col(string_null(Donor::CompanyRegistrationNumber))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DONOR_ALIAS_ID)
                    .table(Donor::Table)
                    .col(Donor::AliasId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DONOR_ALIAS_ID)
                    .from_tbl(Donor::Table)
                    .from_col(Donor::AliasId)
                    .to_tbl(DonorAlias::Table)
                    .to_col(DonorAlias::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DONOR_DONOR_TYPE_ID)
                    .from_tbl(Donor::Table)
                    .from_col(Donor::DonorTypeId)
                    .to_tbl(DonorType::Table)
                    .to_col(DonorType::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DONOR_DONOR_TYPE_ID)
                    .table(Donor::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DONOR_ALIAS_ID)
                    .table(Donor::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DONOR_ALIAS_ID)
                    .table(Donor::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Donor::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Donor {
    Table,
    Id,
    Name,
    DonorTypeId,
    AliasId,
    ExternalDonorId,
    ExternalEntityId,
    Postcode,
    CompanyRegistrationNumber,
}
