use std::sync::Mutex;

use async_trait::async_trait;
use donation_whistle_test_utils::prelude::*;

use crate::server::{
    error::Error,
    model::import::{BatchResult, ImportProgress},
    service::{
        cache::ResponseCache,
        import::{progress::ProgressSink, source::CsvBytesSource},
    },
};

mod import_batch;

/// Progress sink that keeps every update for inspection
#[derive(Default)]
struct RecordingSink {
    reports: Mutex<Vec<ImportProgress>>,
    completed: Mutex<Option<BatchResult>>,
    failed: Mutex<Option<BatchResult>>,
}

impl RecordingSink {
    fn percentages(&self) -> Vec<i32> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .map(|progress| progress.percentage)
            .collect()
    }
}

#[async_trait]
impl ProgressSink for RecordingSink {
    async fn report(&self, progress: ImportProgress) -> Result<(), Error> {
        self.reports.lock().unwrap().push(progress);
        Ok(())
    }

    async fn complete(&self, result: &BatchResult) -> Result<(), Error> {
        *self.completed.lock().unwrap() = Some(result.clone());
        Ok(())
    }

    async fn fail(&self, result: &BatchResult) -> Result<(), Error> {
        *self.failed.lock().unwrap() = Some(result.clone());
        Ok(())
    }
}

/// Cache pre-filled with one entry so tests can check whether an import cleared it
async fn primed_cache() -> ResponseCache {
    let cache = ResponseCache::new();
    cache
        .insert("aliases:overview", &"stale")
        .await
        .expect("cache insert");
    cache
}

fn source_of(records: &[std::collections::HashMap<String, String>]) -> CsvBytesSource {
    CsvBytesSource::new(factory::csv_bytes(records, true).expect("csv bytes"))
}
