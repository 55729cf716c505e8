use super::*;

/// Expect start and stop to be idempotent
#[tokio::test]
async fn start_and_stop_are_idempotent() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let worker = Worker::new(test.db.clone(), ResponseCache::new(), 1);

    assert!(!worker.is_running().await);
    worker.stop().await.unwrap();

    worker.start().await.unwrap();
    worker.start().await.unwrap();
    assert!(worker.is_running().await);

    worker.stop().await.unwrap();
    worker.stop().await.unwrap();
    assert!(!worker.is_running().await);

    Ok(())
}

/// Expect jobs queued while stopped to run once the worker is restarted
#[tokio::test]
async fn restart_runs_jobs_queued_while_stopped() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let path = write_source(
        "restart-runs-queued",
        &[factory::raw_record("C0000001", "Jane Doe")],
    );

    let worker = Worker::new(test.db.clone(), ResponseCache::new(), 1);
    worker.start().await.unwrap();
    worker.stop().await.unwrap();

    let handle = worker.queue().enqueue_import(path.clone()).await.unwrap();
    assert_eq!(handle.status().await.unwrap().status, "pending");

    worker.start().await.unwrap();
    let job = wait_for_job(&handle).await;
    worker.stop().await.unwrap();
    std::fs::remove_file(&path)?;

    assert_eq!(job.status, "complete");
    assert_eq!(job.imported_count, 1);

    Ok(())
}
