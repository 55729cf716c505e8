//! Donation import pipeline.
//!
//! Drives raw records through normalization, identity resolution and donation creation. A
//! batch moves through `Downloading`, `Seeding`, `Counting`, `Processing` and `Finalizing`
//! before reaching `Complete`, or `Failed` on the first fatal error. Every record is committed
//! in its own transaction, so a failed batch keeps the records written before the failure.
//! Records whose external reference is already stored are skipped, which makes re-running an
//! import over overlapping files safe.

pub mod normalize;
pub mod progress;
pub mod source;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    config::DEFAULT_IMPORT_PROGRESS_INTERVAL,
    data::{
        donation::{DonationRepository, NewDonation},
        donation_type::DonationTypeRepository,
        donor_type::DonorTypeRepository,
        recipient::RecipientRepository,
    },
    error::{import::ImportError, Error},
    model::import::{BatchResult, ImportProgress, ImportStage, RecordOutcome},
    service::{cache::ResponseCache, identity::IdentityResolver},
    util::reference::{DONATION_TYPES, DONOR_TYPES},
};

use self::{
    normalize::{normalize, NormalizedRecord},
    progress::ProgressSink,
    source::RecordSource,
};

/// Percentage reported once the source is ready.
const PREPARED_PERCENTAGE: i32 = 5;

pub struct ImportService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
    progress_interval: usize,
}

impl<'a> ImportService<'a> {
    /// Creates a new instance of ImportService.
    ///
    /// # Arguments
    /// - `db` - Database connection reference
    /// - `cache` - Response cache cleared after every successful batch
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self {
            db,
            cache,
            progress_interval: DEFAULT_IMPORT_PROGRESS_INTERVAL,
        }
    }

    /// Reports processing progress every `interval` records instead of the default.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Imports every record of `source`, reporting progress to `progress`.
    ///
    /// Errors do not escape: a fatal error stops the batch, is logged, and is returned in
    /// [`BatchResult::error`] with `failed` set. Counters reflect the records handled before
    /// the failure. The response cache is cleared only when the batch completes.
    pub async fn import_batch(
        &self,
        source: &mut dyn RecordSource,
        progress: &dyn ProgressSink,
    ) -> BatchResult {
        let mut result = BatchResult::default();

        match self.run_batch(source, progress, &mut result).await {
            Ok(()) => {
                self.cache.clear().await;

                tracing::info!(
                    "Import complete: {} imported, {} skipped, {} discarded",
                    result.imported_count,
                    result.skipped_count,
                    result.discarded_count
                );

                if let Err(e) = progress.complete(&result).await {
                    tracing::error!("Failed to record import completion: {}", e);
                }
            }
            Err(e) => {
                result.failed = true;
                result.error = Some(e.to_string());

                tracing::error!(
                    "Import failed after {} records: {}",
                    result.processed_count(),
                    e
                );

                if let Err(e) = progress.fail(&result).await {
                    tracing::error!("Failed to record import failure: {}", e);
                }
            }
        }

        result
    }

    async fn run_batch(
        &self,
        source: &mut dyn RecordSource,
        progress: &dyn ProgressSink,
        result: &mut BatchResult,
    ) -> Result<(), Error> {
        let report = |stage: ImportStage, percentage: i32, processed: u64, total: u64| {
            progress.report(ImportProgress {
                stage,
                percentage,
                processed,
                total,
            })
        };

        report(ImportStage::Downloading, 0, 0, 0).await?;
        source.prepare().await?;

        report(ImportStage::Seeding, PREPARED_PERCENTAGE, 0, 0).await?;
        let donation_type_ids = self.seed_reference_types().await?;

        report(ImportStage::Counting, PREPARED_PERCENTAGE, 0, 0).await?;
        let total = source.records()?.count() as u64;
        tracing::debug!("Import source holds {} records", total);

        report(ImportStage::Processing, PREPARED_PERCENTAGE, 0, total).await?;
        for (index, record) in source.records()?.enumerate() {
            let outcome = match normalize(&record?)? {
                Some(record) => self.import_record(&record, &donation_type_ids).await?,
                None => RecordOutcome::Discarded,
            };
            result.record(outcome);

            let processed = index as u64 + 1;
            if processed % self.progress_interval as u64 == 0 {
                report(
                    ImportStage::Processing,
                    processing_percentage(processed, total),
                    processed,
                    total,
                )
                .await?;
            }
        }

        report(ImportStage::Finalizing, 100, result.processed_count(), total).await?;

        Ok(())
    }

    /// Seeds donor and donation types, returning donation type IDs by code.
    async fn seed_reference_types(&self) -> Result<HashMap<String, i32>, Error> {
        let donor_types = DonorTypeRepository::new(self.db).seed(DONOR_TYPES).await?;
        let donation_type_repo = DonationTypeRepository::new(self.db);
        let donation_types = donation_type_repo.seed(DONATION_TYPES).await?;

        if donor_types + donation_types > 0 {
            tracing::debug!(
                "Seeded {} donor types and {} donation types",
                donor_types,
                donation_types
            );
        }

        Ok(donation_type_repo.get_id_map().await?)
    }

    /// Writes one normalized record in its own transaction.
    ///
    /// The recipient, donor, and donor alias are created as needed alongside the donation.
    /// A record whose external reference is already stored is skipped before anything is
    /// written.
    ///
    /// # Returns
    /// - `Ok(RecordOutcome::Imported)` - The donation was written
    /// - `Ok(RecordOutcome::Skipped)` - The donation was already imported
    /// - `Err(Error)` - The record could not be written, nothing from it was committed
    pub async fn import_record(
        &self,
        record: &NormalizedRecord,
        donation_type_ids: &HashMap<String, i32>,
    ) -> Result<RecordOutcome, Error> {
        if DonationRepository::new(self.db)
            .exists_by_external_ref(&record.external_ref)
            .await?
        {
            return Ok(RecordOutcome::Skipped);
        }

        let donation_type_id = *donation_type_ids
            .get(&record.donation_type_code)
            .ok_or_else(|| ImportError::UnknownDonationType(record.donation_type_code.clone()))?;

        let txn = self.db.begin().await?;

        let recipient = RecipientRepository::new(&txn)
            .get_or_create(&record.recipient_name, record.deregistered_date)
            .await?;
        let donor = IdentityResolver::new(&txn)
            .resolve_or_create_donor(
                &record.donor_name,
                &record.donor_type_code,
                record.donor.clone(),
            )
            .await?;
        DonationRepository::new(&txn)
            .create(NewDonation {
                donor_id: donor.id,
                recipient_id: recipient.id,
                donation_type_id,
                value: record.value,
                date: record.date,
                external_ref: record.external_ref.clone(),
                is_legacy: record.is_legacy,
            })
            .await?;

        txn.commit().await?;

        Ok(RecordOutcome::Imported)
    }
}

/// Maps records processed onto the range after the prepared percentage.
fn processing_percentage(processed: u64, total: u64) -> i32 {
    if total == 0 {
        return 100;
    }

    let span = (100 - PREPARED_PERCENTAGE) as u64;
    PREPARED_PERCENTAGE + (span * processed.min(total) / total) as i32
}
