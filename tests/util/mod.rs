//! Helpers for building application state and reading responses in integration tests

use std::{path::PathBuf, sync::Arc};

use axum::response::Response;
use donation_whistle::server::{
    model::{
        alias::AliasImportMode,
        app::{AppSettings, AppState},
    },
    service::cache::ResponseCache,
    worker::Worker,
};
use donation_whistle_test_utils::TestContext;
use serde::de::DeserializeOwned;

/// Extension trait for TestContext to create AppState backed by a stopped worker
///
/// Jobs enqueued through the state stay in the worker's queue until it is started, so keep the
/// returned worker alive for as long as the state is used.
pub trait TestContextExt {
    fn worker(&self, cache: &ResponseCache) -> Worker;

    fn app_state(&self, worker: &Worker, cache: &ResponseCache) -> AppState {
        self.app_state_with_mode(worker, cache, AliasImportMode::Lenient)
    }

    fn app_state_with_mode(
        &self,
        worker: &Worker,
        cache: &ResponseCache,
        mode: AliasImportMode,
    ) -> AppState;
}

impl TestContextExt for TestContext {
    fn worker(&self, cache: &ResponseCache) -> Worker {
        Worker::new(self.db.clone(), cache.clone(), 1)
    }

    fn app_state_with_mode(
        &self,
        worker: &Worker,
        cache: &ResponseCache,
        mode: AliasImportMode,
    ) -> AppState {
        AppState {
            db: self.db.clone(),
            cache: cache.clone(),
            queue: worker.queue().clone(),
            settings: Arc::new(AppSettings {
                raw_data_path: PathBuf::from("raw_data.csv"),
                alias_import_mode: mode,
            }),
        }
    }
}

/// Reads a JSON response body
pub async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");

    serde_json::from_slice(&bytes).expect("deserialize response body")
}
