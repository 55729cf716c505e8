use donation_whistle::{model::alias::AliasDto, server::controller::alias::delete_alias};
use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

/// Expect 200 with a singleton alias for every former donor
#[tokio::test]
async fn rehomes_every_donor() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ledger_tables().build().await?;
    let (alias, _) = test
        .ledger()
        .insert_alias_with_donors("Acme Group", &["Acme Ltd", "Acme Holdings Ltd"])
        .await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let response = delete_alias(State(test.app_state(&worker, &cache)), Path(alias.id))
        .await
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let rehomed: Vec<AliasDto> = json_body(response).await;
    assert_eq!(rehomed.len(), 2);
    assert!(rehomed
        .iter()
        .all(|alias| alias.donors.len() == 1 && alias.donors[0].name == alias.name));
    assert_eq!(entity::prelude::Donor::find().count(&test.db).await?, 2);
    assert!(test.ledger().ownership_is_consistent().await?);

    Ok(())
}
