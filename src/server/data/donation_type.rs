use std::collections::{HashMap, HashSet};

use sea_orm::{ActiveValue, ConnectionTrait, DbErr, EntityTrait};

pub struct DonationTypeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DonationTypeRepository<'a, C> {
    /// Creates a new instance of [`DonationTypeRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts any of the codes not stored yet, returning the number inserted
    pub async fn seed(&self, codes: &[&str]) -> Result<u64, DbErr> {
        let existing: HashSet<String> = entity::prelude::DonationType::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|donation_type| donation_type.code)
            .collect();

        let missing: Vec<entity::donation_type::ActiveModel> = codes
            .iter()
            .filter(|code| !existing.contains(**code))
            .map(|code| entity::donation_type::ActiveModel {
                code: ActiveValue::Set(code.to_string()),
                ..Default::default()
            })
            .collect();

        let inserted = missing.len() as u64;
        if inserted > 0 {
            entity::prelude::DonationType::insert_many(missing)
                .exec(self.db)
                .await?;
        }

        Ok(inserted)
    }

    /// Maps every stored donation type code to its record ID
    pub async fn get_id_map(&self) -> Result<HashMap<String, i32>, DbErr> {
        Ok(entity::prelude::DonationType::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|donation_type| (donation_type.code, donation_type.id))
            .collect())
    }
}
