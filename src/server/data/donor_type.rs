use std::collections::{HashMap, HashSet};

use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct DonorTypeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DonorTypeRepository<'a, C> {
    /// Creates a new instance of [`DonorTypeRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts any of the `(code, display_name)` pairs whose code is not stored yet
    ///
    /// Returns the number of donor types inserted.
    pub async fn seed(&self, donor_types: &[(&str, &str)]) -> Result<u64, DbErr> {
        let existing: HashSet<String> = entity::prelude::DonorType::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|donor_type| donor_type.code)
            .collect();

        let missing: Vec<entity::donor_type::ActiveModel> = donor_types
            .iter()
            .filter(|(code, _)| !existing.contains(*code))
            .map(|(code, display_name)| entity::donor_type::ActiveModel {
                code: ActiveValue::Set(code.to_string()),
                display_name: ActiveValue::Set(display_name.to_string()),
                ..Default::default()
            })
            .collect();

        let inserted = missing.len() as u64;
        if inserted > 0 {
            entity::prelude::DonorType::insert_many(missing)
                .exec(self.db)
                .await?;
        }

        Ok(inserted)
    }

    pub async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<entity::donor_type::Model>, DbErr> {
        entity::prelude::DonorType::find()
            .filter(entity::donor_type::Column::Code.eq(code))
            .one(self.db)
            .await
    }

    /// Maps every stored donor type code to its record ID
    pub async fn get_id_map(&self) -> Result<HashMap<String, i32>, DbErr> {
        Ok(entity::prelude::DonorType::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|donor_type| (donor_type.code, donor_type.id))
            .collect())
    }

    /// Maps every stored donor type ID to its code
    pub async fn get_code_map(&self) -> Result<HashMap<i32, String>, DbErr> {
        Ok(entity::prelude::DonorType::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|donor_type| (donor_type.id, donor_type.code))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    mod seed {
        use donation_whistle_test_utils::prelude::*;

        use crate::server::data::donor_type::DonorTypeRepository;

        /// Expect every donor type to be inserted on first seed
        #[tokio::test]
        async fn inserts_missing_types() -> Result<(), TestError> {
            let test = TestBuilder::new().with_ledger_tables().build().await?;

            let repo = DonorTypeRepository::new(&test.db);
            let inserted = repo
                .seed(&[("individual", "Individual"), ("company", "Company")])
                .await?;

            assert_eq!(inserted, 2);
            assert_eq!(repo.get_id_map().await?.len(), 2);

            Ok(())
        }

        /// Expect seeding the same list twice to insert nothing the second time
        #[tokio::test]
        async fn is_idempotent() -> Result<(), TestError> {
            let test = TestBuilder::new().with_ledger_tables().build().await?;

            let repo = DonorTypeRepository::new(&test.db);
            let types = [("individual", "Individual"), ("company", "Company")];
            repo.seed(&types).await?;
            let inserted = repo.seed(&types).await?;

            assert_eq!(inserted, 0);
            assert_eq!(repo.get_id_map().await?.len(), 2);

            Ok(())
        }

        /// Expect Error when the donor type table does not exist
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            let repo = DonorTypeRepository::new(&test.db);
            let result = repo.seed(&[("individual", "Individual")]).await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod find_by_code {
        use donation_whistle_test_utils::prelude::*;

        use crate::server::data::donor_type::DonorTypeRepository;

        /// Expect Some for a seeded code and None for an unknown one
        #[tokio::test]
        async fn finds_seeded_code() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_ledger_tables()
                .with_reference_types()
                .build()
                .await?;

            let repo = DonorTypeRepository::new(&test.db);

            let company = repo.find_by_code("company").await?;
            assert!(matches!(company, Some(ref t) if t.display_name == "Company"));
            assert!(repo.find_by_code("soletrader").await?.is_none());

            Ok(())
        }
    }
}
