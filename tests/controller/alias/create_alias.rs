use axum::Json;
use donation_whistle::{
    model::alias::{AliasDto, CreateAliasDto},
    server::controller::alias::create_alias,
};

use super::*;

/// Expect 201 with the new alias holding the requested donors
#[tokio::test]
async fn creates_alias() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_donor("ACME PLC")
        .with_donor("ACME Ltd")
        .build()
        .await?;
    let plc = test.ledger().donor("ACME PLC").await?.unwrap();
    let ltd = test.ledger().donor("ACME Ltd").await?.unwrap();
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let response = create_alias(
        State(test.app_state(&worker, &cache)),
        Json(CreateAliasDto {
            name: "ACME Group".to_string(),
            note: None,
            donor_ids: vec![plc.id, ltd.id],
        }),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(response.status(), StatusCode::CREATED);
    let alias: AliasDto = json_body(response).await;
    assert_eq!(alias.name, "ACME Group");
    assert_eq!(alias.donors.len(), 2);
    assert_eq!(
        test.ledger().donor("ACME PLC").await?.unwrap().alias_id,
        alias.id
    );
    assert!(test.ledger().ownership_is_consistent().await?);

    Ok(())
}

/// Expect 409 when the name belongs to an unrelated alias
#[tokio::test]
async fn duplicate_name_is_conflict() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_donor("ACME PLC")
        .with_donor("ACME Ltd")
        .build()
        .await?;
    let ltd = test.ledger().donor("ACME Ltd").await?.unwrap();
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let result = create_alias(
        State(test.app_state(&worker, &cache)),
        Json(CreateAliasDto {
            name: "ACME PLC".to_string(),
            note: None,
            donor_ids: vec![ltd.id],
        }),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(result.err().unwrap().into_response().status(), StatusCode::CONFLICT);

    Ok(())
}

/// Expect 404 for a donor ID that does not exist
#[tokio::test]
async fn unknown_donor_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let result = create_alias(
        State(test.app_state(&worker, &cache)),
        Json(CreateAliasDto {
            name: "Nobody".to_string(),
            note: None,
            donor_ids: vec![41],
        }),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}
