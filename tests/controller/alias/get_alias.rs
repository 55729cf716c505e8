use donation_whistle::{model::alias::AliasDto, server::controller::alias::get_alias};

use super::*;

/// Expect 200 with the alias and its donors
#[tokio::test]
async fn returns_alias() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let (alias, _) = test
        .ledger()
        .insert_alias_with_donors("Acme Group", &["Acme Ltd", "Acme Holdings Ltd"])
        .await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let response = get_alias(State(test.app_state(&worker, &cache)), Path(alias.id))
        .await
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let dto: AliasDto = json_body(response).await;
    let names: Vec<&str> = dto.donors.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Acme Holdings Ltd", "Acme Ltd"]);

    Ok(())
}

/// Expect 404 for an unknown alias
#[tokio::test]
async fn unknown_alias_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let result = get_alias(State(test.app_state(&worker, &cache)), Path(12)).await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}
