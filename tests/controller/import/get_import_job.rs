use donation_whistle::{
    model::import::ImportJobDto,
    server::controller::import::{get_import_job, get_latest_import_job, start_import},
};

use super::*;

/// Expect 200 with the state of a queued job
#[tokio::test]
async fn returns_queued_job() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);
    let state = test.app_state(&worker, &cache);

    let queued: ImportJobDto = json_body(
        start_import(State(state.clone()))
            .await
            .unwrap()
            .into_response(),
    )
    .await;
    let response = get_import_job(State(state), Path(queued.id))
        .await
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let job: ImportJobDto = json_body(response).await;
    assert_eq!(job, queued);

    Ok(())
}

/// Expect 404 for an unknown job ID
#[tokio::test]
async fn unknown_job_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let result = get_import_job(State(test.app_state(&worker, &cache)), Path(5)).await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}

/// Expect the latest job to be the most recently queued one, and 404 before any
#[tokio::test]
async fn latest_job() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);
    let state = test.app_state(&worker, &cache);

    let none = get_latest_import_job(State(state.clone()))
        .await
        .unwrap()
        .into_response();
    assert_eq!(none.status(), StatusCode::NOT_FOUND);

    start_import(State(state.clone())).await.unwrap();
    let second: ImportJobDto = json_body(
        start_import(State(state.clone()))
            .await
            .unwrap()
            .into_response(),
    )
    .await;
    let latest: ImportJobDto = json_body(
        get_latest_import_job(State(state))
            .await
            .unwrap()
            .into_response(),
    )
    .await;

    assert_eq!(latest.id, second.id);

    Ok(())
}
