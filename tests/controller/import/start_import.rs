use donation_whistle::{model::import::ImportJobDto, server::controller::import::start_import};

use super::*;

/// Expect 202 with a pending job while the worker is stopped
#[tokio::test]
async fn queues_pending_job() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let response = start_import(State(test.app_state(&worker, &cache)))
        .await
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let job: ImportJobDto = json_body(response).await;
    assert_eq!(job.status, "pending");
    assert_eq!(job.progress, 0);
    assert!(!worker.is_running().await);

    Ok(())
}
