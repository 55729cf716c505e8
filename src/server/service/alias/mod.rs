//! Alias ledger service.
//!
//! Curates how donor records are grouped into aliases. Every operation runs in one transaction
//! and keeps the ledger invariants: each donor is owned by exactly one alias, no alias is left
//! without donors, and alias names are unique unless the alias contains a donor of that exact
//! name. Successful changes clear the response cache.

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, HashMap};

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serde::Deserialize;

use crate::{
    model::alias::{
        AliasDto, AliasExportEntry, AliasOverviewDto, BulkImportSummaryDto, DonorDto,
    },
    server::{
        data::{
            donor::DonorRepository, donor_alias::DonorAliasRepository,
            donor_type::DonorTypeRepository,
        },
        error::{alias::AliasError, Error},
        model::{
            alias::AliasImportMode,
            db::{DonorAliasModel, DonorModel},
        },
        service::cache::ResponseCache,
    },
};

/// Accepted shapes of an uploaded alias ledger.
///
/// The list form is what [`AliasService::export`] produces. The map form pairs alias names
/// with donor names directly.
#[derive(Deserialize)]
#[serde(untagged)]
enum AliasLedgerUpload {
    Entries(Vec<AliasExportEntry>),
    Mapping(BTreeMap<String, Vec<String>>),
}

impl AliasLedgerUpload {
    fn into_entries(self) -> Vec<AliasExportEntry> {
        match self {
            Self::Entries(entries) => entries,
            Self::Mapping(mapping) => mapping
                .into_iter()
                .map(|(alias_name, donor_names)| AliasExportEntry {
                    alias_name,
                    donor_names,
                })
                .collect(),
        }
    }
}

/// Service for curating donor aliases.
pub struct AliasService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
}

impl<'a> AliasService<'a> {
    /// Creates a new instance of AliasService.
    ///
    /// # Arguments
    /// - `db` - Database connection reference
    /// - `cache` - Response cache cleared after every successful change
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self { db, cache }
    }

    /// Lists every alias with its donors.
    ///
    /// Aliases are split into those grouping several donors and those owning a single donor,
    /// each ordered by alias name.
    pub async fn list(&self) -> Result<AliasOverviewDto, Error> {
        let aliases = DonorAliasRepository::new(self.db)
            .get_all_with_donors()
            .await?;
        let codes = DonorTypeRepository::new(self.db).get_code_map().await?;

        let mut overview = AliasOverviewDto {
            grouped: Vec::new(),
            ungrouped: Vec::new(),
        };
        for (alias, donors) in aliases {
            match donors.len() {
                0 => continue,
                1 => overview.ungrouped.push(alias_dto(alias, donors, &codes)),
                _ => overview.grouped.push(alias_dto(alias, donors, &codes)),
            }
        }

        Ok(overview)
    }

    /// Retrieves a single alias with its donors.
    ///
    /// # Returns
    /// - `Ok(AliasDto)` - The alias and its donors ordered by name
    /// - `Err(Error::AliasError(AliasError::UnknownAlias))` - No alias with that ID
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn get(&self, alias_id: i32) -> Result<AliasDto, Error> {
        let (alias, donors) = DonorAliasRepository::new(self.db)
            .get_with_donors(alias_id)
            .await?
            .ok_or(AliasError::UnknownAlias(alias_id))?;
        let codes = DonorTypeRepository::new(self.db).get_code_map().await?;

        Ok(alias_dto(alias, donors, &codes))
    }

    /// Creates an alias and moves the given donors into it.
    ///
    /// Aliases left without donors by the move are deleted.
    ///
    /// # Arguments
    /// - `name` - Alias name, surrounding whitespace is trimmed
    /// - `note` - Optional free-text note, blank notes are stored as none
    /// - `donor_ids` - Donors to group, duplicates are ignored
    ///
    /// # Returns
    /// - `Ok(AliasDto)` - The new alias with its donors
    /// - `Err(Error::AliasError(AliasError::EmptyName))` - Name is blank
    /// - `Err(Error::AliasError(AliasError::NoDonors))` - No donor IDs were given
    /// - `Err(Error::AliasError(AliasError::UnknownDonor))` - A donor ID does not exist
    /// - `Err(Error::AliasError(AliasError::DuplicateAliasName))` - Name is taken and no
    ///   grouped donor has that exact name
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn create(
        &self,
        name: &str,
        note: Option<String>,
        donor_ids: &[i32],
    ) -> Result<AliasDto, Error> {
        let name = validate_name(name)?;
        if donor_ids.is_empty() {
            return Err(AliasError::NoDonors.into());
        }

        let mut donor_ids = donor_ids.to_vec();
        donor_ids.sort_unstable();
        donor_ids.dedup();

        let txn = self.db.begin().await?;
        let alias_repo = DonorAliasRepository::new(&txn);
        let donor_repo = DonorRepository::new(&txn);

        let donors = donor_repo.get_many_by_ids(&donor_ids).await?;
        if let Some(missing) = donor_ids
            .iter()
            .find(|id| !donors.iter().any(|donor| donor.id == **id))
        {
            return Err(AliasError::UnknownDonor(*missing).into());
        }

        ensure_name_available(&txn, &name, None, &donors).await?;

        let alias = alias_repo.create(&name, normalize_note(note)).await?;
        let previous_alias_ids: Vec<i32> = donors.iter().map(|donor| donor.alias_id).collect();
        donor_repo.update_alias(&donor_ids, alias.id).await?;
        let pruned = alias_repo.delete_if_empty(&previous_alias_ids).await?;

        txn.commit().await?;
        self.cache.clear().await;

        tracing::info!(
            alias_id = alias.id,
            donors = donor_ids.len(),
            pruned = pruned.len(),
            "Created alias {:?}",
            alias.name
        );

        self.get(alias.id).await
    }

    /// Renames an alias and/or changes its note.
    ///
    /// Fields passed as `None` are left unchanged. The name guard is checked against the
    /// alias's current donors and ignores the alias itself.
    ///
    /// # Returns
    /// - `Ok(AliasDto)` - The updated alias
    /// - `Err(Error::AliasError(AliasError::UnknownAlias))` - No alias with that ID
    /// - `Err(Error::AliasError(AliasError::EmptyName))` - New name is blank
    /// - `Err(Error::AliasError(AliasError::DuplicateAliasName))` - New name is taken
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn rename(
        &self,
        alias_id: i32,
        name: Option<String>,
        note: Option<String>,
    ) -> Result<AliasDto, Error> {
        let txn = self.db.begin().await?;
        let alias_repo = DonorAliasRepository::new(&txn);

        let (alias, donors) = alias_repo
            .get_with_donors(alias_id)
            .await?
            .ok_or(AliasError::UnknownAlias(alias_id))?;

        let new_name = match name {
            Some(name) => validate_name(&name)?,
            None => alias.name.clone(),
        };
        if new_name != alias.name {
            ensure_name_available(&txn, &new_name, Some(alias_id), &donors).await?;
        }

        let new_note = match note {
            Some(note) => normalize_note(Some(note)),
            None => alias.note.clone(),
        };

        alias_repo
            .update(alias_id, new_name, new_note)
            .await?
            .ok_or(AliasError::UnknownAlias(alias_id))?;

        txn.commit().await?;
        self.cache.clear().await;

        tracing::info!(alias_id, "Updated alias {:?}", alias.name);

        self.get(alias_id).await
    }

    /// Removes a donor from an alias.
    ///
    /// The donor moves to a new singleton alias named after itself. When the alias is named
    /// after the donor being removed, or the donor is its only member, the alias is deleted
    /// instead and every member gets a singleton alias.
    ///
    /// # Returns
    /// - `Ok(Vec<AliasDto>)` - The singleton aliases created by the operation
    /// - `Err(Error::AliasError(AliasError::UnknownAlias))` - No alias with that ID
    /// - `Err(Error::AliasError(AliasError::UnknownDonor))` - No donor with that ID
    /// - `Err(Error::AliasError(AliasError::DonorNotInAlias))` - Donor belongs to another alias
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn remove_donor(&self, alias_id: i32, donor_id: i32) -> Result<Vec<AliasDto>, Error> {
        let txn = self.db.begin().await?;
        let alias_repo = DonorAliasRepository::new(&txn);
        let donor_repo = DonorRepository::new(&txn);

        let (alias, donors) = alias_repo
            .get_with_donors(alias_id)
            .await?
            .ok_or(AliasError::UnknownAlias(alias_id))?;

        let Some(donor) = donors.iter().find(|donor| donor.id == donor_id).cloned() else {
            return match donor_repo.get_by_id(donor_id).await? {
                Some(_) => Err(AliasError::DonorNotInAlias { alias_id, donor_id }.into()),
                None => Err(AliasError::UnknownDonor(donor_id).into()),
            };
        };

        let created = if alias.name == donor.name || donors.len() == 1 {
            dissolve(&txn, &alias, &donors).await?
        } else {
            let singleton = alias_repo.create(&donor.name, None).await?;
            donor_repo.update_alias(&[donor.id], singleton.id).await?;
            alias_repo
                .update(alias.id, alias.name.clone(), alias.note.clone())
                .await?;

            vec![singleton.id]
        };

        txn.commit().await?;
        self.cache.clear().await;

        tracing::info!(
            alias_id,
            donor_id,
            "Removed donor {:?} from alias {:?}",
            donor.name,
            alias.name
        );

        self.get_many(&created).await
    }

    /// Deletes an alias, moving each of its donors to a new singleton alias.
    ///
    /// # Returns
    /// - `Ok(Vec<AliasDto>)` - The singleton aliases created for the former members
    /// - `Err(Error::AliasError(AliasError::UnknownAlias))` - No alias with that ID
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn delete(&self, alias_id: i32) -> Result<Vec<AliasDto>, Error> {
        let txn = self.db.begin().await?;

        let (alias, donors) = DonorAliasRepository::new(&txn)
            .get_with_donors(alias_id)
            .await?
            .ok_or(AliasError::UnknownAlias(alias_id))?;

        let created = dissolve(&txn, &alias, &donors).await?;

        txn.commit().await?;
        self.cache.clear().await;

        tracing::info!(
            alias_id,
            donors = donors.len(),
            "Deleted alias {:?}",
            alias.name
        );

        self.get_many(&created).await
    }

    /// Exports the alias ledger.
    ///
    /// Aliases are ordered by name then ID and their donor names are sorted. Aliases without
    /// donors are left out.
    pub async fn export(&self) -> Result<Vec<AliasExportEntry>, Error> {
        let aliases = DonorAliasRepository::new(self.db)
            .get_all_with_donors()
            .await?;

        Ok(aliases
            .into_iter()
            .filter(|(_, donors)| !donors.is_empty())
            .map(|(alias, donors)| AliasExportEntry {
                alias_name: alias.name,
                donor_names: donors.into_iter().map(|donor| donor.name).collect(),
            })
            .collect())
    }

    /// Replaces the whole alias ledger with an uploaded one.
    ///
    /// The payload is either the list produced by [`AliasService::export`] or an object
    /// mapping alias names to donor names. Existing aliases are deleted, every entry with at
    /// least one known donor becomes a new alias, and donors the upload does not mention get
    /// a fresh singleton alias. A donor listed under several entries ends up in the last one.
    ///
    /// # Arguments
    /// - `payload` - JSON alias ledger
    /// - `mode` - Whether unknown donor names are skipped or reject the upload
    ///
    /// # Returns
    /// - `Ok(BulkImportSummaryDto)` - Counts of created aliases and any skipped donor names
    /// - `Err(Error::AliasError(AliasError::MalformedInput))` - Payload is not a ledger or names
    ///   a blank alias, nothing was changed
    /// - `Err(Error::AliasError(AliasError::UnmatchedDonorName))` - Strict mode and the upload
    ///   names unknown donors, nothing was changed
    /// - `Err(Error::DbErr)` - Database operation failed, nothing was changed
    pub async fn bulk_import(
        &self,
        payload: &str,
        mode: AliasImportMode,
    ) -> Result<BulkImportSummaryDto, Error> {
        let mut entries = serde_json::from_str::<AliasLedgerUpload>(payload)
            .map_err(|e| AliasError::MalformedInput(e.to_string()))?
            .into_entries();
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.alias_name = validate_name(&entry.alias_name).map_err(|_| {
                AliasError::MalformedInput(format!("entry {} has a blank alias name", index))
            })?;
        }

        let txn = self.db.begin().await?;
        let alias_repo = DonorAliasRepository::new(&txn);
        let donor_repo = DonorRepository::new(&txn);

        let previous_alias_ids = alias_repo.get_all_ids().await?;
        let donors = donor_repo.get_all().await?;
        let donors_by_name: HashMap<&str, &DonorModel> = donors
            .iter()
            .map(|donor| (donor.name.as_str(), donor))
            .collect();

        let mut assignment: HashMap<i32, usize> = HashMap::new();
        let mut unmatched_donor_names = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            for donor_name in &entry.donor_names {
                match donors_by_name.get(donor_name.as_str()) {
                    Some(donor) => {
                        assignment.insert(donor.id, index);
                    }
                    None => unmatched_donor_names.push(donor_name.clone()),
                }
            }
        }

        if !unmatched_donor_names.is_empty() {
            match mode {
                AliasImportMode::Strict => {
                    return Err(AliasError::UnmatchedDonorName(unmatched_donor_names).into());
                }
                AliasImportMode::Lenient => {
                    for name in &unmatched_donor_names {
                        tracing::warn!("Skipping unknown donor {:?} in alias ledger upload", name);
                    }
                }
            }
        }

        let mut members: Vec<Vec<i32>> = vec![Vec::new(); entries.len()];
        for (donor_id, index) in &assignment {
            members[*index].push(*donor_id);
        }

        let mut alias_count = 0;
        for (entry, donor_ids) in entries.iter().zip(members.iter()) {
            if donor_ids.is_empty() {
                tracing::warn!(
                    "Skipping alias {:?} in alias ledger upload, none of its donors exist",
                    entry.alias_name
                );
                continue;
            }

            let alias = alias_repo.create(&entry.alias_name, None).await?;
            donor_repo.update_alias(donor_ids, alias.id).await?;
            alias_count += 1;
        }

        let mut singleton_count = 0;
        for donor in donors.iter().filter(|donor| !assignment.contains_key(&donor.id)) {
            let alias = alias_repo.create(&donor.name, None).await?;
            donor_repo.update_alias(&[donor.id], alias.id).await?;
            singleton_count += 1;
        }

        alias_repo.delete_many(&previous_alias_ids).await?;

        txn.commit().await?;
        self.cache.clear().await;

        tracing::info!(
            aliases = alias_count,
            singletons = singleton_count,
            unmatched = unmatched_donor_names.len(),
            "Replaced alias ledger from upload"
        );

        Ok(BulkImportSummaryDto {
            alias_count,
            singleton_count,
            unmatched_donor_names,
        })
    }

    async fn get_many(&self, alias_ids: &[i32]) -> Result<Vec<AliasDto>, Error> {
        let mut aliases = Vec::with_capacity(alias_ids.len());
        for alias_id in alias_ids {
            aliases.push(self.get(*alias_id).await?);
        }

        Ok(aliases)
    }
}

/// Moves every donor of an alias to a singleton alias of its own name, then deletes the alias.
///
/// Returns the IDs of the created aliases.
async fn dissolve(
    txn: &DatabaseTransaction,
    alias: &DonorAliasModel,
    donors: &[DonorModel],
) -> Result<Vec<i32>, Error> {
    let alias_repo = DonorAliasRepository::new(txn);
    let donor_repo = DonorRepository::new(txn);

    let mut created = Vec::with_capacity(donors.len());
    for donor in donors {
        let singleton = alias_repo.create(&donor.name, None).await?;
        donor_repo.update_alias(&[donor.id], singleton.id).await?;
        created.push(singleton.id);
    }

    alias_repo.delete(alias.id).await?;

    Ok(created)
}

/// Rejects a name already used by another alias unless one of `donors` has that exact name.
async fn ensure_name_available<C: ConnectionTrait>(
    db: &C,
    name: &str,
    exclude_alias_id: Option<i32>,
    donors: &[DonorModel],
) -> Result<(), Error> {
    let taken = DonorAliasRepository::new(db)
        .name_exists(name, exclude_alias_id)
        .await?;

    if taken && !donors.iter().any(|donor| donor.name == name) {
        return Err(AliasError::DuplicateAliasName(name.to_string()).into());
    }

    Ok(())
}

fn validate_name(name: &str) -> Result<String, AliasError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AliasError::EmptyName);
    }

    Ok(name.to_string())
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|note| note.trim().to_string())
        .filter(|note| !note.is_empty())
}

fn alias_dto(
    alias: DonorAliasModel,
    donors: Vec<DonorModel>,
    donor_type_codes: &HashMap<i32, String>,
) -> AliasDto {
    AliasDto {
        id: alias.id,
        name: alias.name,
        note: alias.note,
        last_edited_at: alias.last_edited_at,
        donors: donors
            .into_iter()
            .map(|donor| DonorDto {
                id: donor.id,
                donor_type: donor_type_codes
                    .get(&donor.donor_type_id)
                    .cloned()
                    .unwrap_or_default(),
                name: donor.name,
                external_donor_id: donor.external_donor_id,
                postcode: donor.postcode,
                company_registration_number: donor.company_registration_number,
            })
            .collect(),
    }
}
