use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

/// Fields of a donation about to be written.
#[derive(Clone, Debug)]
pub struct NewDonation {
    pub donor_id: i32,
    pub recipient_id: i32,
    pub donation_type_id: i32,
    pub value: Decimal,
    pub date: NaiveDate,
    pub external_ref: String,
    pub is_legacy: bool,
}

pub struct DonationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DonationRepository<'a, C> {
    /// Creates a new instance of [`DonationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, donation: NewDonation) -> Result<entity::donation::Model, DbErr> {
        let donation = entity::donation::ActiveModel {
            donor_id: ActiveValue::Set(donation.donor_id),
            recipient_id: ActiveValue::Set(donation.recipient_id),
            donation_type_id: ActiveValue::Set(donation.donation_type_id),
            value: ActiveValue::Set(donation.value),
            date: ActiveValue::Set(donation.date),
            external_ref: ActiveValue::Set(donation.external_ref),
            is_legacy: ActiveValue::Set(donation.is_legacy),
            ..Default::default()
        };

        donation.insert(self.db).await
    }

    /// Checks whether a donation with the given external reference was already imported
    pub async fn exists_by_external_ref(&self, external_ref: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Donation::find()
            .filter(entity::donation::Column::ExternalRef.eq(external_ref))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn get_by_donor_id(
        &self,
        donor_id: i32,
    ) -> Result<Vec<entity::donation::Model>, DbErr> {
        entity::prelude::Donation::find()
            .filter(entity::donation::Column::DonorId.eq(donor_id))
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Donation::find().count(self.db).await
    }
}
