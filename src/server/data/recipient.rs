use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct RecipientRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RecipientRepository<'a, C> {
    /// Creates a new instance of [`RecipientRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<entity::recipient::Model>, DbErr> {
        entity::prelude::Recipient::find()
            .filter(entity::recipient::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Returns the recipient with the given name, creating it if it does not exist
    ///
    /// The deregistration date is only written when the recipient is created.
    pub async fn get_or_create(
        &self,
        name: &str,
        deregistered_date: Option<NaiveDate>,
    ) -> Result<entity::recipient::Model, DbErr> {
        if let Some(recipient) = self.find_by_name(name).await? {
            return Ok(recipient);
        }

        let recipient = entity::recipient::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            deregistered_date: ActiveValue::Set(deregistered_date),
            ..Default::default()
        };

        recipient.insert(self.db).await
    }
}
