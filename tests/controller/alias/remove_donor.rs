use donation_whistle::{model::alias::AliasDto, server::controller::alias::remove_donor};

use super::*;

/// Expect 200 with the donor moved to an alias of its own
#[tokio::test]
async fn moves_donor_to_singleton() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let (alias, donors) = test
        .ledger()
        .insert_alias_with_donors("Acme Group", &["Acme Ltd", "Acme Holdings Ltd"])
        .await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let response = remove_donor(
        State(test.app_state(&worker, &cache)),
        Path((alias.id, donors[0].id)),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let _: Vec<AliasDto> = json_body(response).await;
    assert_eq!(
        test.ledger().donor_names_in_alias(alias.id).await?,
        vec![donors[1].name.clone()]
    );
    let moved = test.ledger().donor(&donors[0].name).await?.unwrap();
    assert_ne!(moved.alias_id, alias.id);

    Ok(())
}

/// Expect 400 when the donor belongs to another alias
#[tokio::test]
async fn foreign_donor_is_bad_request() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let (alias, _) = test
        .ledger()
        .insert_alias_with_donors("Acme Group", &["Acme Ltd", "Acme Holdings Ltd"])
        .await?;
    let (_, stranger) = test.ledger().insert_donor("Jane Doe").await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let result = remove_donor(
        State(test.app_state(&worker, &cache)),
        Path((alias.id, stranger.id)),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::BAD_REQUEST
    );

    Ok(())
}
