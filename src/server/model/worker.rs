//! Worker job definitions for background task processing.
//!
//! Each `WorkerJob` variant carries the minimal data a handler needs. The import job ID refers
//! to the `import_job` row that tracks the job's progress.

use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum WorkerJob {
    /// Import every donation record from the CSV at `source_path`.
    ImportDonations { job_id: i32, source_path: PathBuf },
}

impl WorkerJob {
    /// ID of the `import_job` row tracking this job.
    pub fn job_id(&self) -> i32 {
        match self {
            Self::ImportDonations { job_id, .. } => *job_id,
        }
    }
}

impl fmt::Display for WorkerJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImportDonations {
                job_id,
                source_path,
            } => write!(
                f,
                "ImportDonations {{ job_id: {}, source_path: {} }}",
                job_id,
                source_path.display()
            ),
        }
    }
}
