use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

/// Expect a queued import to run to completion and record its counts
#[tokio::test]
async fn runs_queued_import() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    cache.insert("aliases:overview", &"stale").await.unwrap();
    let mut irrelevant = factory::raw_record("C0000003", "Jane Doe");
    irrelevant.insert("ReportingPeriodName".to_string(), "EU referendum".to_string());
    let path = write_source(
        "runs-queued-import",
        &[
            factory::raw_record("C0000001", "ACME PLC"),
            factory::raw_record("C0000002", "Jane Doe"),
            irrelevant,
        ],
    );

    let worker = Worker::new(test.db.clone(), cache.clone(), 1);
    worker.start().await.unwrap();
    let handle = worker.queue().enqueue_import(path.clone()).await.unwrap();
    let job = wait_for_job(&handle).await;
    worker.stop().await.unwrap();
    std::fs::remove_file(&path)?;

    assert_eq!(job.status, "complete");
    assert_eq!(job.progress, 100);
    assert_eq!(job.total_count, 3);
    assert_eq!(job.imported_count, 2);
    assert_eq!(job.discarded_count, 1);
    assert!(job.completed_at.is_some());
    assert_eq!(entity::prelude::Donation::find().count(&test.db).await?, 2);
    assert!(cache.is_empty().await);

    Ok(())
}

/// Expect a missing source file to mark the job failed
#[tokio::test]
async fn missing_source_fails_job() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();

    let worker = Worker::new(test.db.clone(), cache, 1);
    worker.start().await.unwrap();
    let handle = worker
        .queue()
        .enqueue_import(PathBuf::from("/nonexistent/donations.csv"))
        .await
        .unwrap();
    let job = wait_for_job(&handle).await;
    worker.stop().await.unwrap();

    assert_eq!(job.status, "failed");
    assert!(job.error.unwrap().contains("unavailable"));
    assert_eq!(entity::prelude::Donor::find().count(&test.db).await?, 0);

    Ok(())
}
