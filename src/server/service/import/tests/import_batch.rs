use sea_orm::{EntityTrait, PaginatorTrait};

use crate::server::{
    data::donation::DonationRepository,
    model::import::ImportStage,
    service::import::{
        progress::NoopProgressSink,
        source::{CsvFileSource, RecordSource},
        ImportService,
    },
};

use super::*;

/// Expect rows sharing a donor name to share one donor and singleton alias
#[tokio::test]
async fn groups_rows_by_cleaned_donor_name() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let mut source = source_of(&[
        factory::raw_record("C0000001", "ACME PLC"),
        factory::raw_record("C0000002", "  ACME PLC "),
        factory::raw_record("C0000003", "Jane Doe"),
    ]);

    let result = ImportService::new(&test.db, &cache)
        .import_batch(&mut source, &NoopProgressSink)
        .await;

    assert!(!result.failed);
    assert_eq!(result.imported_count, 3);
    assert_eq!(entity::prelude::Donor::find().count(&test.db).await?, 2);
    assert_eq!(entity::prelude::DonorAlias::find().count(&test.db).await?, 2);
    assert_eq!(entity::prelude::Donation::find().count(&test.db).await?, 3);
    assert_eq!(
        test.ledger()
            .donor_names_in_alias(test.ledger().donor("ACME PLC").await?.unwrap().alias_id)
            .await?,
        vec!["ACME PLC".to_string()]
    );
    assert!(test.ledger().ownership_is_consistent().await?);

    Ok(())
}

/// Expect records outside the central party to be discarded without writes
#[tokio::test]
async fn discards_irrelevant_records() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let mut record = factory::raw_record("C0000001", "Jane Doe");
    record.insert("AccountingUnitName".to_string(), "Regional Office".to_string());
    let mut source = source_of(&[record]);

    let result = ImportService::new(&test.db, &cache)
        .import_batch(&mut source, &NoopProgressSink)
        .await;

    assert!(!result.failed);
    assert_eq!(result.imported_count, 0);
    assert_eq!(result.discarded_count, 1);
    assert_eq!(entity::prelude::Donor::find().count(&test.db).await?, 0);
    assert_eq!(entity::prelude::Donation::find().count(&test.db).await?, 0);

    Ok(())
}

/// Expect a second import of the same rows to skip every relevant record
#[tokio::test]
async fn reimport_skips_existing_references() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let mut irrelevant = factory::raw_record("C0000003", "Jane Doe");
    irrelevant.insert("DonationAction".to_string(), "Returned".to_string());
    let records = [
        factory::raw_record("C0000001", "ACME PLC"),
        factory::raw_record("C0000002", "Jane Doe"),
        irrelevant,
    ];

    let service = ImportService::new(&test.db, &cache);
    let first = service
        .import_batch(&mut source_of(&records), &NoopProgressSink)
        .await;
    let second = service
        .import_batch(&mut source_of(&records), &NoopProgressSink)
        .await;

    assert_eq!(first.imported_count, 2);
    assert_eq!(second.imported_count, 0);
    assert_eq!(second.skipped_count, 2);
    assert_eq!(second.discarded_count, 1);
    assert_eq!(DonationRepository::new(&test.db).count().await?, 2);

    Ok(())
}

/// Expect a malformed value to fail the batch while keeping earlier records
#[tokio::test]
async fn failure_keeps_committed_records() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = primed_cache().await;
    let mut bad = factory::raw_record("C0000002", "Acme Ltd");
    bad.insert("Value".to_string(), "lots".to_string());
    let mut source = source_of(&[
        factory::raw_record("C0000001", "Jane Doe"),
        bad,
        factory::raw_record("C0000003", "John Smith"),
    ]);
    let sink = RecordingSink::default();

    let result = ImportService::new(&test.db, &cache)
        .import_batch(&mut source, &sink)
        .await;

    assert!(result.failed);
    assert_eq!(result.imported_count, 1);
    assert!(result.error.as_deref().unwrap().contains("Value"));
    assert_eq!(sink.failed.lock().unwrap().as_ref(), Some(&result));
    assert!(sink.completed.lock().unwrap().is_none());
    assert_eq!(entity::prelude::Donation::find().count(&test.db).await?, 1);
    assert!(test.ledger().donor("Acme Ltd").await?.is_none());
    assert!(test.ledger().donor("John Smith").await?.is_none());
    assert!(!cache.is_empty().await);

    Ok(())
}

/// Expect an unavailable source to fail before anything is written
#[tokio::test]
async fn unavailable_source_writes_nothing() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let mut source = CsvFileSource::new("/nonexistent/donations.csv");
    let sink = RecordingSink::default();

    let result = ImportService::new(&test.db, &cache)
        .import_batch(&mut source, &sink)
        .await;

    assert!(result.failed);
    assert_eq!(result.processed_count(), 0);
    assert_eq!(entity::prelude::DonorType::find().count(&test.db).await?, 0);
    assert_eq!(sink.percentages(), vec![0]);
    assert!(sink.failed.lock().unwrap().is_some());

    Ok(())
}

/// Expect monotonic progress from 5% after preparation up to 100%
#[tokio::test]
async fn reports_progress_every_interval() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let records: Vec<_> = (1..=4)
        .map(|i| factory::raw_record(&format!("C000000{i}"), &format!("Donor {i}")))
        .collect();
    let mut source = source_of(&records);
    let sink = RecordingSink::default();

    ImportService::new(&test.db, &cache)
        .with_progress_interval(2)
        .import_batch(&mut source, &sink)
        .await;

    // Downloading, Seeding, Counting, Processing start, 2 of 4, 4 of 4, Finalizing
    assert_eq!(sink.percentages(), vec![0, 5, 5, 5, 52, 100, 100]);
    let stages: Vec<ImportStage> = sink
        .reports
        .lock()
        .unwrap()
        .iter()
        .map(|progress| progress.stage)
        .collect();
    assert_eq!(stages.first(), Some(&ImportStage::Downloading));
    assert_eq!(stages.last(), Some(&ImportStage::Finalizing));
    assert_eq!(sink.completed.lock().unwrap().as_ref().unwrap().imported_count, 4);

    Ok(())
}

/// Expect a successful batch to clear the response cache
#[tokio::test]
async fn success_clears_cache() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = primed_cache().await;
    let mut source = source_of(&[factory::raw_record("C0000001", "Jane Doe")]);

    let result = ImportService::new(&test.db, &cache)
        .import_batch(&mut source, &NoopProgressSink)
        .await;

    assert!(!result.failed);
    assert!(cache.is_empty().await);

    Ok(())
}

/// Expect an empty source to complete at 100% with nothing imported
#[tokio::test]
async fn empty_source_completes() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let mut source = source_of(&[]);
    source.prepare().await.unwrap();
    let sink = RecordingSink::default();

    let result = ImportService::new(&test.db, &cache)
        .import_batch(&mut source, &sink)
        .await;

    assert!(!result.failed);
    assert_eq!(result.processed_count(), 0);
    assert_eq!(sink.percentages().last(), Some(&100));
    // Reference types are seeded even when there is nothing to import
    assert_eq!(entity::prelude::DonationType::find().count(&test.db).await?, 8);

    Ok(())
}
