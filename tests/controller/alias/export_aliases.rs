use donation_whistle::{
    model::alias::AliasExportEntry, server::controller::alias::export_aliases,
};

use super::*;

/// Expect 200 with entries ordered by alias name and sorted donor names
#[tokio::test]
async fn exports_ledger() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ledger_tables()
        .with_donor("Jane Doe")
        .with_alias("Acme Group", &["Acme Ltd", "Acme Holdings Ltd"])
        .build()
        .await?;
    let cache = ResponseCache::new();
    let worker = test.worker(&cache);

    let response = export_aliases(State(test.app_state(&worker, &cache)))
        .await
        .unwrap()
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let entries: Vec<AliasExportEntry> = json_body(response).await;
    assert_eq!(
        entries,
        vec![
            AliasExportEntry {
                alias_name: "Acme Group".to_string(),
                donor_names: vec!["Acme Holdings Ltd".to_string(), "Acme Ltd".to_string()],
            },
            AliasExportEntry {
                alias_name: "Jane Doe".to_string(),
                donor_names: vec!["Jane Doe".to_string()],
            },
        ]
    );
    assert!(!cache.is_empty().await);

    Ok(())
}
