use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::ID_BATCH_SIZE;

pub struct DonorAliasRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DonorAliasRepository<'a, C> {
    /// Creates a new instance of [`DonorAliasRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new alias, stamped as edited now
    pub async fn create(
        &self,
        name: &str,
        note: Option<String>,
    ) -> Result<entity::donor_alias::Model, DbErr> {
        let alias = entity::donor_alias::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            note: ActiveValue::Set(note),
            last_edited_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        alias.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        alias_id: i32,
    ) -> Result<Option<entity::donor_alias::Model>, DbErr> {
        entity::prelude::DonorAlias::find_by_id(alias_id)
            .one(self.db)
            .await
    }

    /// Fetches an alias together with its donors, ordered by donor name
    pub async fn get_with_donors(
        &self,
        alias_id: i32,
    ) -> Result<Option<(entity::donor_alias::Model, Vec<entity::donor::Model>)>, DbErr> {
        let Some(alias) = self.get_by_id(alias_id).await? else {
            return Ok(None);
        };

        let donors = entity::prelude::Donor::find()
            .filter(entity::donor::Column::AliasId.eq(alias_id))
            .order_by_asc(entity::donor::Column::Name)
            .all(self.db)
            .await?;

        Ok(Some((alias, donors)))
    }

    /// Fetches every alias with its donors, ordered by alias name then ID
    ///
    /// Donors within each alias are ordered by name.
    pub async fn get_all_with_donors(
        &self,
    ) -> Result<Vec<(entity::donor_alias::Model, Vec<entity::donor::Model>)>, DbErr> {
        let mut aliases = entity::prelude::DonorAlias::find()
            .order_by_asc(entity::donor_alias::Column::Name)
            .order_by_asc(entity::donor_alias::Column::Id)
            .find_with_related(entity::prelude::Donor)
            .all(self.db)
            .await?;

        for (_, donors) in aliases.iter_mut() {
            donors.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(aliases)
    }

    pub async fn get_all_ids(&self) -> Result<Vec<i32>, DbErr> {
        entity::prelude::DonorAlias::find()
            .select_only()
            .column(entity::donor_alias::Column::Id)
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Checks whether any alias other than `exclude_id` already uses the name
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query = entity::prelude::DonorAlias::find()
            .filter(entity::donor_alias::Column::Name.eq(name));

        if let Some(alias_id) = exclude_id {
            query = query.filter(entity::donor_alias::Column::Id.ne(alias_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Sets a new name and note on an alias and stamps it as edited now
    ///
    /// Returns `Ok(None)` if the alias does not exist.
    pub async fn update(
        &self,
        alias_id: i32,
        name: String,
        note: Option<String>,
    ) -> Result<Option<entity::donor_alias::Model>, DbErr> {
        let Some(alias) = self.get_by_id(alias_id).await? else {
            return Ok(None);
        };

        let mut alias_am = alias.into_active_model();
        alias_am.name = ActiveValue::Set(name);
        alias_am.note = ActiveValue::Set(note);
        alias_am.last_edited_at = ActiveValue::Set(Utc::now().naive_utc());

        let alias = alias_am.update(self.db).await?;

        Ok(Some(alias))
    }

    /// Deletes an alias
    ///
    /// Returns OK regardless of the alias existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, alias_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::DonorAlias::delete_by_id(alias_id)
            .exec(self.db)
            .await
    }

    /// Deletes the given aliases in batches of [`ID_BATCH_SIZE`]
    ///
    /// Returns the number of aliases deleted.
    pub async fn delete_many(&self, alias_ids: &[i32]) -> Result<u64, DbErr> {
        let mut deleted = 0;
        for batch in alias_ids.chunks(ID_BATCH_SIZE) {
            let result = entity::prelude::DonorAlias::delete_many()
                .filter(entity::donor_alias::Column::Id.is_in(batch.iter().copied()))
                .exec(self.db)
                .await?;
            deleted += result.rows_affected;
        }

        Ok(deleted)
    }

    /// Deletes whichever of the given aliases no longer own any donor
    ///
    /// Returns the IDs of the aliases deleted.
    pub async fn delete_if_empty(&self, alias_ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        if alias_ids.is_empty() {
            return Ok(Vec::new());
        }

        let owners: HashSet<i32> = entity::prelude::Donor::find()
            .select_only()
            .column(entity::donor::Column::AliasId)
            .filter(entity::donor::Column::AliasId.is_in(alias_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(self.db)
            .await?
            .into_iter()
            .collect();

        let mut empty: Vec<i32> = alias_ids
            .iter()
            .copied()
            .filter(|alias_id| !owners.contains(alias_id))
            .collect();
        empty.sort_unstable();
        empty.dedup();

        if !empty.is_empty() {
            self.delete_many(&empty).await?;
        }

        Ok(empty)
    }
}
