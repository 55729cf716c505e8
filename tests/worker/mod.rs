//! Tests for the import worker.

mod import_donations;
mod lifecycle;

use std::{path::PathBuf, time::Duration};

use donation_whistle::server::{
    model::{db::ImportJobModel, import::ImportStage},
    service::cache::ResponseCache,
    worker::{JobHandle, Worker},
};
use donation_whistle_test_utils::prelude::*;

/// Writes records to a CSV file unique to this test.
fn write_source(name: &str, records: &[std::collections::HashMap<String, String>]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "donation-whistle-{}-{}.csv",
        name,
        std::process::id()
    ));
    let bytes = factory::csv_bytes(records, true).expect("csv bytes");
    std::fs::write(&path, bytes).expect("write source file");

    path
}

/// Polls a job until it reaches a terminal stage.
async fn wait_for_job(handle: &JobHandle) -> ImportJobModel {
    for _ in 0..500 {
        let job = handle.status().await.expect("job status");
        let stage: ImportStage = job.status.parse().expect("known stage");
        if stage.is_terminal() {
            return job;
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("import job {} did not finish", handle.id());
}
