use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use super::ID_BATCH_SIZE;

/// Identifying details recorded for a donor when it is first seen.
///
/// Empty source columns are stored as `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DonorMetadata {
    pub external_donor_id: Option<String>,
    pub external_entity_id: Option<String>,
    pub postcode: Option<String>,
    pub company_registration_number: Option<String>,
}

pub struct DonorRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DonorRepository<'a, C> {
    /// Creates a new instance of [`DonorRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a donor owned by the given alias
    pub async fn create(
        &self,
        name: &str,
        donor_type_id: i32,
        alias_id: i32,
        metadata: DonorMetadata,
    ) -> Result<entity::donor::Model, DbErr> {
        let donor = entity::donor::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            donor_type_id: ActiveValue::Set(donor_type_id),
            alias_id: ActiveValue::Set(alias_id),
            external_donor_id: ActiveValue::Set(metadata.external_donor_id),
            external_entity_id: ActiveValue::Set(metadata.external_entity_id),
            postcode: ActiveValue::Set(metadata.postcode),
            company_registration_number: ActiveValue::Set(metadata.company_registration_number),
            ..Default::default()
        };

        donor.insert(self.db).await
    }

    pub async fn get_by_id(&self, donor_id: i32) -> Result<Option<entity::donor::Model>, DbErr> {
        entity::prelude::Donor::find_by_id(donor_id).one(self.db).await
    }

    /// Looks up a donor by its exact cleaned name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::donor::Model>, DbErr> {
        entity::prelude::Donor::find()
            .filter(entity::donor::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Fetches the donors with the given IDs, silently leaving out IDs that do not exist
    pub async fn get_many_by_ids(
        &self,
        donor_ids: &[i32],
    ) -> Result<Vec<entity::donor::Model>, DbErr> {
        entity::prelude::Donor::find()
            .filter(entity::donor::Column::Id.is_in(donor_ids.iter().copied()))
            .order_by_asc(entity::donor::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count_by_alias_id(&self, alias_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Donor::find()
            .filter(entity::donor::Column::AliasId.eq(alias_id))
            .count(self.db)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<entity::donor::Model>, DbErr> {
        entity::prelude::Donor::find()
            .order_by_asc(entity::donor::Column::Id)
            .all(self.db)
            .await
    }

    /// Moves the given donors to another alias, in batches of [`ID_BATCH_SIZE`]
    ///
    /// Returns the number of donors updated.
    pub async fn update_alias(&self, donor_ids: &[i32], alias_id: i32) -> Result<u64, DbErr> {
        let mut updated = 0;
        for batch in donor_ids.chunks(ID_BATCH_SIZE) {
            let result = entity::prelude::Donor::update_many()
                .col_expr(entity::donor::Column::AliasId, Expr::value(alias_id))
                .filter(entity::donor::Column::Id.is_in(batch.iter().copied()))
                .exec(self.db)
                .await?;
            updated += result.rows_affected;
        }

        Ok(updated)
    }
}
