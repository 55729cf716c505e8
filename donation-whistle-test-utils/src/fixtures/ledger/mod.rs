//! Donation ledger fixtures.
//!
//! Inserts records directly through SeaORM so tests do not depend on the repositories under
//! test.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{
    constant::{
        TEST_DONATION_TYPE, TEST_DONATION_TYPES, TEST_DONOR_TYPE, TEST_DONOR_TYPES,
    },
    error::TestError,
    TestContext,
};

impl TestContext {
    pub fn ledger(&self) -> LedgerFixtures<'_> {
        LedgerFixtures { db: &self.db }
    }
}

pub struct LedgerFixtures<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LedgerFixtures<'a> {
    /// Inserts the donor type, or returns it if the code already exists.
    pub async fn insert_donor_type(
        &self,
        code: &str,
        display_name: &str,
    ) -> Result<entity::donor_type::Model, TestError> {
        if let Some(existing) = entity::prelude::DonorType::find()
            .filter(entity::donor_type::Column::Code.eq(code))
            .one(self.db)
            .await?
        {
            return Ok(existing);
        }

        Ok(
            entity::prelude::DonorType::insert(entity::donor_type::ActiveModel {
                code: ActiveValue::Set(code.to_string()),
                display_name: ActiveValue::Set(display_name.to_string()),
                ..Default::default()
            })
            .exec_with_returning(self.db)
            .await?,
        )
    }

    /// Inserts the donation type, or returns it if the code already exists.
    pub async fn insert_donation_type(
        &self,
        code: &str,
    ) -> Result<entity::donation_type::Model, TestError> {
        if let Some(existing) = entity::prelude::DonationType::find()
            .filter(entity::donation_type::Column::Code.eq(code))
            .one(self.db)
            .await?
        {
            return Ok(existing);
        }

        Ok(
            entity::prelude::DonationType::insert(entity::donation_type::ActiveModel {
                code: ActiveValue::Set(code.to_string()),
                ..Default::default()
            })
            .exec_with_returning(self.db)
            .await?,
        )
    }

    /// Inserts every known donor and donation type.
    pub async fn insert_reference_types(&self) -> Result<(), TestError> {
        for (code, display_name) in TEST_DONOR_TYPES {
            self.insert_donor_type(code, display_name).await?;
        }

        for code in TEST_DONATION_TYPES {
            self.insert_donation_type(code).await?;
        }

        Ok(())
    }

    pub async fn insert_alias(&self, name: &str) -> Result<entity::donor_alias::Model, TestError> {
        Ok(
            entity::prelude::DonorAlias::insert(entity::donor_alias::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                note: ActiveValue::Set(None),
                last_edited_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(self.db)
            .await?,
        )
    }

    /// Inserts a donor owned by an existing alias, using the default test donor type.
    pub async fn insert_donor_in_alias(
        &self,
        name: &str,
        alias_id: i32,
    ) -> Result<entity::donor::Model, TestError> {
        let (code, display_name) = TEST_DONOR_TYPE;
        let donor_type = self.insert_donor_type(code, display_name).await?;

        Ok(
            entity::prelude::Donor::insert(entity::donor::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                donor_type_id: ActiveValue::Set(donor_type.id),
                alias_id: ActiveValue::Set(alias_id),
                ..Default::default()
            })
            .exec_with_returning(self.db)
            .await?,
        )
    }

    /// Inserts a donor along with a singleton alias of the same name.
    pub async fn insert_donor(
        &self,
        name: &str,
    ) -> Result<(entity::donor_alias::Model, entity::donor::Model), TestError> {
        let alias = self.insert_alias(name).await?;
        let donor = self.insert_donor_in_alias(name, alias.id).await?;

        Ok((alias, donor))
    }

    /// Inserts an alias grouping new donors with the given names.
    pub async fn insert_alias_with_donors(
        &self,
        alias_name: &str,
        donor_names: &[&str],
    ) -> Result<(entity::donor_alias::Model, Vec<entity::donor::Model>), TestError> {
        let alias = self.insert_alias(alias_name).await?;

        let mut donors = Vec::new();
        for name in donor_names {
            donors.push(self.insert_donor_in_alias(name, alias.id).await?);
        }

        Ok((alias, donors))
    }

    pub async fn insert_recipient(
        &self,
        name: &str,
    ) -> Result<entity::recipient::Model, TestError> {
        Ok(
            entity::prelude::Recipient::insert(entity::recipient::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                deregistered_date: ActiveValue::Set(None),
                ..Default::default()
            })
            .exec_with_returning(self.db)
            .await?,
        )
    }

    /// Inserts a cash donation of 100.00 dated 2024-01-01.
    pub async fn insert_donation(
        &self,
        donor_id: i32,
        recipient_id: i32,
        external_ref: &str,
    ) -> Result<entity::donation::Model, TestError> {
        let donation_type = self.insert_donation_type(TEST_DONATION_TYPE).await?;
        let date = NaiveDate::from_ymd_opt(2024, 1, 1)
            .ok_or_else(|| TestError::Fixture("invalid donation date".to_string()))?;

        Ok(
            entity::prelude::Donation::insert(entity::donation::ActiveModel {
                donor_id: ActiveValue::Set(donor_id),
                recipient_id: ActiveValue::Set(recipient_id),
                donation_type_id: ActiveValue::Set(donation_type.id),
                value: ActiveValue::Set(Decimal::new(10000, 2)),
                date: ActiveValue::Set(date),
                external_ref: ActiveValue::Set(external_ref.to_string()),
                is_legacy: ActiveValue::Set(false),
                ..Default::default()
            })
            .exec_with_returning(self.db)
            .await?,
        )
    }

    /// Reloads a donor by name.
    pub async fn donor(&self, name: &str) -> Result<Option<entity::donor::Model>, TestError> {
        Ok(entity::prelude::Donor::find()
            .filter(entity::donor::Column::Name.eq(name))
            .one(self.db)
            .await?)
    }

    /// Returns the names of the donors owned by an alias, sorted.
    pub async fn donor_names_in_alias(&self, alias_id: i32) -> Result<Vec<String>, TestError> {
        let mut names: Vec<String> = entity::prelude::Donor::find()
            .filter(entity::donor::Column::AliasId.eq(alias_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|donor| donor.name)
            .collect();
        names.sort();

        Ok(names)
    }

    /// Checks that every donor references an existing alias and that no alias is empty.
    pub async fn ownership_is_consistent(&self) -> Result<bool, TestError> {
        let alias_ids: HashSet<i32> = entity::prelude::DonorAlias::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|alias| alias.id)
            .collect();
        let owner_ids: HashSet<i32> = entity::prelude::Donor::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(|donor| donor.alias_id)
            .collect();

        Ok(owner_ids == alias_ids)
    }
}
