use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000002_donation_type::DonationType, m20251101_000003_recipient::Recipient,
    m20251101_000005_donor::Donor,
};

static IDX_DONATION_DONOR_ID: &str = "idx-donation-donor_id";
static IDX_DONATION_RECIPIENT_ID: &str = "idx-donation-recipient_id";
static IDX_DONATION_DATE: &str = "idx-donation-date";
static FK_DONATION_DONOR_ID: &str = "fk-donation-donor_id";
static FK_DONATION_RECIPIENT_ID: &str = "fk-donation-recipient_id";
static FK_DONATION_DONATION_TYPE_ID: &str = "fk-donation-donation_type_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donation::Table)
                    .if_not_exists()
                    .col(pk_auto(Donation::Id))
                    .col(integer(Donation::DonorId))
                    .col(integer(Donation::RecipientId))
                    .col(integer(Donation::DonationTypeId))
                    .col(decimal_len(Donation::Value, 14, 2))
                    .col(date(Donation::Date))
                    .col(string_uniq(Donation::ExternalRef))
                    .col(boolean(Donation::IsLegacy))
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            (IDX_DONATION_DONOR_ID, Donation::DonorId),
            (IDX_DONATION_RECIPIENT_ID, Donation::RecipientId),
            (IDX_DONATION_DATE, Donation::Date),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Donation::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DONATION_DONOR_ID)
                    .from_tbl(Donation::Table)
                    .from_col(Donation::DonorId)
                    .to_tbl(Donor::Table)
                    .to_col(Donor::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DONATION_RECIPIENT_ID)
                    .from_tbl(Donation::Table)
                    .from_col(Donation::RecipientId)
                    .to_tbl(Recipient::Table)
                    .to_col(Recipient::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DONATION_DONATION_TYPE_ID)
                    .from_tbl(Donation::Table)
                    .from_col(Donation::DonationTypeId)
                    .to_tbl(DonationType::Table)
                    .to_col(DonationType::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            FK_DONATION_DONATION_TYPE_ID,
            FK_DONATION_RECIPIENT_ID,
            FK_DONATION_DONOR_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(name)
                        .table(Donation::Table)
                        .to_owned(),
                )
                .await?;
        }

        for name in [
            IDX_DONATION_DATE,
            IDX_DONATION_RECIPIENT_ID,
            IDX_DONATION_DONOR_ID,
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Donation::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Donation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Donation {
    Table,
    Id,
    DonorId,
    RecipientId,
    DonationTypeId,
    Value,
    Date,
    ExternalRef,
    IsLegacy,
}
