//! Resolves raw donor names to donor records.
//!
//! Each distinct cleaned donor name maps to exactly one donor. A donor seen for the first time
//! is created together with a singleton alias of the same name so it is never without an
//! alias. Metadata is taken from the first record that introduces a donor and is not updated
//! afterwards.

use sea_orm::{ConnectionTrait, DbErr, SqlErr, TransactionSession, TransactionTrait};

use crate::server::{
    data::{
        donor::{DonorMetadata, DonorRepository},
        donor_alias::DonorAliasRepository,
        donor_type::DonorTypeRepository,
    },
    error::{import::ImportError, Error},
    model::db::DonorModel,
};

pub struct IdentityResolver<'a, C: ConnectionTrait + TransactionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> IdentityResolver<'a, C> {
    /// Creates a new instance of [`IdentityResolver`]
    ///
    /// `db` may be a connection or an open transaction, in which case creation runs in a
    /// savepoint of that transaction.
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Returns the donor with the given name, creating it with a singleton alias if needed.
    ///
    /// Lookup is by exact name. When the donor already exists the provided type and metadata
    /// are ignored. Creation of the alias and donor is atomic; if a concurrent import created
    /// the same donor first, the unique constraint on the name rejects this insert and the
    /// winning record is returned instead.
    ///
    /// # Arguments
    /// - `name` - Cleaned donor name
    /// - `donor_type_code` - Code of the donor's category, used only on creation
    /// - `metadata` - Identifying details, used only on creation
    ///
    /// # Returns
    /// - `Ok(DonorModel)` - The existing or newly created donor
    /// - `Err(Error::ImportError)` - A new donor's type code is not seeded
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn resolve_or_create_donor(
        &self,
        name: &str,
        donor_type_code: &str,
        metadata: DonorMetadata,
    ) -> Result<DonorModel, Error> {
        let donor_repo = DonorRepository::new(self.db);

        if let Some(donor) = donor_repo.find_by_name(name).await? {
            return Ok(donor);
        }

        let donor_type_id = DonorTypeRepository::new(self.db)
            .find_by_code(donor_type_code)
            .await?
            .ok_or_else(|| ImportError::UnknownDonorType(donor_type_code.to_string()))?
            .id;

        let txn = self.db.begin().await?;
        let created = {
            let alias = DonorAliasRepository::new(&txn).create(name, None).await;
            match alias {
                Ok(alias) => {
                    DonorRepository::new(&txn)
                        .create(name, donor_type_id, alias.id, metadata)
                        .await
                }
                Err(e) => Err(e),
            }
        };

        match created {
            Ok(donor) => {
                txn.commit().await?;
                tracing::debug!(donor_id = donor.id, "Created donor {:?}", name);

                Ok(donor)
            }
            Err(e) if is_unique_violation(&e) => {
                txn.rollback().await?;
                tracing::debug!("Donor {:?} was created concurrently, re-reading", name);

                donor_repo
                    .find_by_name(name)
                    .await?
                    .ok_or_else(|| Error::DbErr(e))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
