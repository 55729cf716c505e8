//! Progress reporting for import batches.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::import_job::ImportJobRepository,
    error::{worker::WorkerError, Error},
    model::import::{BatchResult, ImportProgress},
};

/// Receives progress updates from a running import batch.
///
/// Percentages reported for one batch never decrease. Exactly one of `complete` or `fail` is
/// called when the batch stops.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn report(&self, progress: ImportProgress) -> Result<(), Error>;

    async fn complete(&self, result: &BatchResult) -> Result<(), Error>;

    /// Called when the batch stops early, `result.error` describes why.
    async fn fail(&self, result: &BatchResult) -> Result<(), Error>;
}

/// Persists progress to an `import_job` row.
pub struct ImportJobTracker {
    db: DatabaseConnection,
    job_id: i32,
}

impl ImportJobTracker {
    pub fn new(db: DatabaseConnection, job_id: i32) -> Self {
        Self { db, job_id }
    }

    async fn finish(&self, result: &BatchResult) -> Result<(), Error> {
        ImportJobRepository::new(&self.db)
            .finish(self.job_id, result)
            .await?
            .ok_or(WorkerError::JobNotFound(self.job_id))?;

        Ok(())
    }
}

#[async_trait]
impl ProgressSink for ImportJobTracker {
    async fn report(&self, progress: ImportProgress) -> Result<(), Error> {
        tracing::debug!(
            job_id = self.job_id,
            stage = %progress.stage,
            "Import {}% ({}/{})",
            progress.percentage,
            progress.processed,
            progress.total
        );

        ImportJobRepository::new(&self.db)
            .update_progress(self.job_id, progress)
            .await?
            .ok_or(WorkerError::JobNotFound(self.job_id))?;

        Ok(())
    }

    async fn complete(&self, result: &BatchResult) -> Result<(), Error> {
        self.finish(result).await
    }

    async fn fail(&self, result: &BatchResult) -> Result<(), Error> {
        self.finish(result).await
    }
}

/// Discards all progress, for imports nobody is watching.
pub struct NoopProgressSink;

#[async_trait]
impl ProgressSink for NoopProgressSink {
    async fn report(&self, _progress: ImportProgress) -> Result<(), Error> {
        Ok(())
    }

    async fn complete(&self, _result: &BatchResult) -> Result<(), Error> {
        Ok(())
    }

    async fn fail(&self, _result: &BatchResult) -> Result<(), Error> {
        Ok(())
    }
}
