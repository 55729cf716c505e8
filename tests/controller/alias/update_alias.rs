use axum::Json;
use donation_whistle::{
    model::alias::{AliasDto, UpdateAliasDto},
    server::controller::alias::update_alias,
};

use super::*;

/// Expect 200 with the renamed alias and its note
#[tokio::test]
async fn renames_alias() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let (alias, _) = test
        .ledger()
        .insert_alias_with_donors("Acme Group", &["Acme Ltd", "Acme Holdings Ltd"])
        .await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let response = update_alias(
        State(test.app_state(&worker, &cache)),
        Path(alias.id),
        Json(UpdateAliasDto {
            name: Some("Acme Companies".to_string()),
            note: Some("Parent and subsidiary".to_string()),
        }),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let dto: AliasDto = json_body(response).await;
    assert_eq!(dto.name, "Acme Companies");
    assert_eq!(dto.note.as_deref(), Some("Parent and subsidiary"));

    Ok(())
}

/// Expect 400 for a blank name
#[tokio::test]
async fn blank_name_is_bad_request() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let (alias, _) = test
        .ledger()
        .insert_alias_with_donors("Acme Group", &["Acme Ltd"])
        .await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let result = update_alias(
        State(test.app_state(&worker, &cache)),
        Path(alias.id),
        Json(UpdateAliasDto {
            name: Some("   ".to_string()),
            ..Default::default()
        }),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::BAD_REQUEST
    );

    Ok(())
}
