use std::path::Path;

use sea_orm::DatabaseConnection;

use crate::server::{
    error::Error,
    model::worker::WorkerJob,
    service::{
        cache::ResponseCache,
        import::{progress::ImportJobTracker, source::CsvFileSource, ImportService},
    },
};

/// Handler for processing worker jobs from the queue
///
/// Each job type has a corresponding method that runs the job against the database and keeps
/// its `import_job` row current.
pub struct WorkerJobHandler {
    db: DatabaseConnection,
    cache: ResponseCache,
    progress_interval: usize,
}

impl WorkerJobHandler {
    pub fn new(db: DatabaseConnection, cache: ResponseCache, progress_interval: usize) -> Self {
        Self {
            db,
            cache,
            progress_interval,
        }
    }

    /// Handle a worker job by delegating to the appropriate handler method
    pub async fn handle(&self, job: &WorkerJob) -> Result<(), Error> {
        match job {
            WorkerJob::ImportDonations {
                job_id,
                source_path,
            } => self.import_donations(*job_id, source_path).await,
        }
    }

    /// Runs one import batch over a CSV file.
    ///
    /// A failed batch is not an error here: the failure is already stored on the job row.
    pub async fn import_donations(&self, job_id: i32, source_path: &Path) -> Result<(), Error> {
        tracing::debug!(
            "Processing donation import job {} from {}",
            job_id,
            source_path.display()
        );

        let mut source = CsvFileSource::new(source_path);
        let tracker = ImportJobTracker::new(self.db.clone(), job_id);

        let result = ImportService::new(&self.db, &self.cache)
            .with_progress_interval(self.progress_interval)
            .import_batch(&mut source, &tracker)
            .await;

        if result.failed {
            tracing::warn!(
                "Import job {} failed: {}",
                job_id,
                result.error.as_deref().unwrap_or("unknown error")
            );
        } else {
            tracing::debug!("Import job {} completed", job_id);
        }

        Ok(())
    }
}
