use donation_whistle::{
    model::alias::BulkImportSummaryDto,
    server::{controller::alias::import_aliases, model::alias::AliasImportMode},
};

use super::*;

/// Expect 200 with a summary after replacing the ledger from the mapping form
#[tokio::test]
async fn replaces_ledger() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_donor("Acme Ltd")
        .with_donor("Acme Holdings Ltd")
        .with_donor("Jane Doe")
        .build()
        .await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let response = import_aliases(
        State(test.app_state(&worker, &cache)),
        r#"{"Acme Group": ["Acme Ltd", "Acme Holdings Ltd", "Acme Overseas"]}"#.to_string(),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let summary: BulkImportSummaryDto = json_body(response).await;
    assert_eq!(summary.alias_count, 1);
    assert_eq!(summary.singleton_count, 1);
    assert_eq!(summary.unmatched_donor_names, vec!["Acme Overseas".to_string()]);
    let acme = test.ledger().donor("Acme Ltd").await?.unwrap();
    assert_eq!(
        test.ledger().donor_names_in_alias(acme.alias_id).await?,
        vec!["Acme Holdings Ltd".to_string(), "Acme Ltd".to_string()]
    );

    Ok(())
}

/// Expect 400 for a payload that is not an alias ledger
#[tokio::test]
async fn malformed_payload_is_bad_request() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_donor("Jane Doe")
        .build()
        .await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let result = import_aliases(
        State(test.app_state(&worker, &cache)),
        "not json".to_string(),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::BAD_REQUEST
    );

    Ok(())
}

/// Expect 400 in strict mode when a donor name does not match
#[tokio::test]
async fn strict_mode_rejects_unmatched_name() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_donor("Acme Ltd")
        .build()
        .await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);
    let state = test.app_state_with_mode(&worker, &cache, AliasImportMode::Strict);

    let result = import_aliases(
        State(state),
        r#"[{"alias_name": "Acme Group", "donor_names": ["Acme Ltd", "Acme Overseas"]}]"#
            .to_string(),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::BAD_REQUEST
    );
    let acme = test.ledger().donor("Acme Ltd").await?.unwrap();
    assert_eq!(
        test.ledger().donor_names_in_alias(acme.alias_id).await?,
        vec!["Acme Ltd".to_string()]
    );

    Ok(())
}
