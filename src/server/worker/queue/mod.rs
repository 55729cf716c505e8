//! In-process job queue for the import worker.
//!
//! Enqueuing an import first creates its `import_job` row, then hands the job to the worker's
//! dispatcher over an unbounded channel. The returned [`JobHandle`] reads the job's progress
//! back from that row, so callers never share memory with the running import.

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use sea_orm::DatabaseConnection;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::server::{
    data::import_job::ImportJobRepository,
    error::{worker::WorkerError, Error},
    model::{
        db::ImportJobModel,
        import::BatchResult,
        worker::WorkerJob,
    },
};

/// Sending side of the worker's job channel, cheap to clone.
#[derive(Clone)]
pub struct WorkerQueue {
    sender: UnboundedSender<WorkerJob>,
    db: DatabaseConnection,
}

impl WorkerQueue {
    /// Creates the queue and the receiver the dispatcher consumes jobs from.
    pub fn new(db: DatabaseConnection) -> (Self, UnboundedReceiver<WorkerJob>) {
        let (sender, receiver) = mpsc::unbounded_channel();

        (Self { sender, db }, receiver)
    }

    /// Queues an import of the CSV file at `source_path`.
    ///
    /// # Returns
    /// - `Ok(JobHandle)` - Handle for the pending job
    /// - `Err(Error::WorkerError(WorkerError::QueueClosed))` - The dispatcher is gone, the job
    ///   row is marked failed
    /// - `Err(Error::DbErr)` - The job row could not be created
    pub async fn enqueue_import(&self, source_path: PathBuf) -> Result<JobHandle, Error> {
        let job_repo = ImportJobRepository::new(&self.db);
        let job = job_repo.create().await?;

        self.enqueue(WorkerJob::ImportDonations {
            job_id: job.id,
            source_path,
        })
        .await
    }

    /// Queues a job whose `import_job` row already exists.
    pub async fn enqueue(&self, job: WorkerJob) -> Result<JobHandle, Error> {
        let job_id = job.job_id();

        if self.sender.send(job).is_err() {
            let error = WorkerError::QueueClosed(job_id);
            tracing::error!("{}", error);

            ImportJobRepository::new(&self.db)
                .finish(
                    job_id,
                    &BatchResult {
                        failed: true,
                        error: Some(error.to_string()),
                        ..Default::default()
                    },
                )
                .await?;

            return Err(error.into());
        }

        tracing::debug!("Queued import job {}", job_id);

        Ok(self.handle(job_id))
    }

    /// Returns a handle for an existing job ID without checking that it exists.
    pub fn handle(&self, job_id: i32) -> JobHandle {
        JobHandle {
            id: job_id,
            db: self.db.clone(),
        }
    }
}

/// Reads the persisted state of one queued job.
#[derive(Clone)]
pub struct JobHandle {
    id: i32,
    db: DatabaseConnection,
}

impl JobHandle {
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Current `import_job` row of the job.
    ///
    /// # Returns
    /// - `Ok(ImportJobModel)` - The job's latest persisted state
    /// - `Err(Error::WorkerError(WorkerError::JobNotFound))` - No job has this ID
    pub async fn status(&self) -> Result<ImportJobModel, Error> {
        ImportJobRepository::new(&self.db)
            .get_by_id(self.id)
            .await?
            .ok_or_else(|| WorkerError::JobNotFound(self.id).into())
    }

    /// Completion percentage from 0 to 100.
    pub async fn progress(&self) -> Result<i32, Error> {
        Ok(self.status().await?.progress)
    }
}
