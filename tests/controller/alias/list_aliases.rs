use donation_whistle::{
    model::alias::AliasOverviewDto, server::controller::alias::list_aliases,
};

use super::*;

/// Expect 200 with grouped and ungrouped aliases
#[tokio::test]
async fn lists_grouped_and_ungrouped() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_alias("Acme Group", &["Acme Ltd", "Acme Holdings Ltd"])
        .with_donor("Jane Doe")
        .build()
        .await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let response = list_aliases(State(test.app_state(&worker, &cache)))
        .await
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let overview: AliasOverviewDto = json_body(response).await;
    assert_eq!(overview.grouped.len(), 1);
    assert_eq!(overview.grouped[0].donors.len(), 2);
    assert_eq!(overview.ungrouped.len(), 1);
    assert_eq!(overview.ungrouped[0].name, "Jane Doe");

    Ok(())
}

/// Expect the overview to be served from cache until the cache is cleared
#[tokio::test]
async fn serves_cached_overview() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_donor("Jane Doe")
        .build()
        .await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);
    let state = test.app_state(&worker, &cache);

    list_aliases(State(state.clone())).await.unwrap();
    // Written behind the cache's back
    test.ledger().insert_donor("John Smith").await?;

    let cached: AliasOverviewDto = json_body(
        list_aliases(State(state.clone()))
            .await
            .unwrap()
            .into_response(),
    )
    .await;
    assert_eq!(cached.ungrouped.len(), 1);

    cache.clear().await;
    let fresh: AliasOverviewDto =
        json_body(list_aliases(State(state)).await.unwrap().into_response()).await;
    assert_eq!(fresh.ungrouped.len(), 2);

    Ok(())
}
