//! Background worker for donation imports.
//!
//! A single dispatcher task consumes the [`WorkerQueue`] channel and runs one job at a time,
//! so at most one import is in progress per process. Jobs are not cancelled: stopping the
//! worker lets the current job finish and leaves queued jobs in the channel for the next
//! `start`.

pub mod handler;
pub mod queue;

pub use queue::{JobHandle, WorkerQueue};

use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;
use tokio::{
    sync::{mpsc::UnboundedReceiver, Mutex, Notify},
    task::JoinHandle,
};

use crate::server::{
    error::Error, model::worker::WorkerJob, service::cache::ResponseCache,
    worker::handler::WorkerJobHandler,
};

/// How long `stop` waits for the current job to finish.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Import worker, cheap to clone.
#[derive(Clone)]
pub struct Worker {
    inner: Arc<WorkerRef>,
}

struct WorkerRef {
    queue: WorkerQueue,
    handler: Arc<WorkerJobHandler>,
    // Held here while stopped, moved into the dispatcher while running
    receiver: Mutex<Option<UnboundedReceiver<WorkerJob>>>,
    dispatcher: Mutex<Option<Dispatcher>>,
}

struct Dispatcher {
    handle: JoinHandle<UnboundedReceiver<WorkerJob>>,
    shutdown: Arc<Notify>,
}

impl Worker {
    /// Creates a stopped worker. Jobs may be queued before it is started.
    ///
    /// # Arguments
    /// - `db` - Database connection used by jobs and job handles
    /// - `cache` - Response cache cleared by successful imports
    /// - `progress_interval` - Records between import progress updates
    pub fn new(db: DatabaseConnection, cache: ResponseCache, progress_interval: usize) -> Self {
        let (queue, receiver) = WorkerQueue::new(db.clone());
        let handler = WorkerJobHandler::new(db, cache, progress_interval);

        Self {
            inner: Arc::new(WorkerRef {
                queue,
                handler: Arc::new(handler),
                receiver: Mutex::new(Some(receiver)),
                dispatcher: Mutex::new(None),
            }),
        }
    }

    pub fn queue(&self) -> &WorkerQueue {
        &self.inner.queue
    }

    /// Starts the dispatcher.
    ///
    /// Idempotent: calling it while running logs a warning and returns Ok.
    ///
    /// # Returns
    /// - `Ok(())` - The dispatcher is running
    /// - `Err(Error::InternalError)` - A previous dispatcher did not stop and still owns the
    ///   channel
    pub async fn start(&self) -> Result<(), Error> {
        let mut dispatcher = self.inner.dispatcher.lock().await;

        if dispatcher.is_some() {
            tracing::warn!("Worker is already running");
            return Ok(());
        }

        let receiver = self.inner.receiver.lock().await.take().ok_or_else(|| {
            Error::InternalError("worker job channel was lost by a previous dispatcher".into())
        })?;

        *dispatcher = Some(self.spawn_dispatcher(receiver));
        tracing::info!("Worker started");

        Ok(())
    }

    fn spawn_dispatcher(&self, mut receiver: UnboundedReceiver<WorkerJob>) -> Dispatcher {
        let handler = Arc::clone(&self.inner.handler);
        let shutdown = Arc::new(Notify::new());
        let signal = Arc::clone(&shutdown);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    // Shutdown wins over queued jobs
                    biased;

                    _ = signal.notified() => {
                        tracing::debug!("Dispatcher received shutdown signal");
                        break;
                    }

                    job = receiver.recv() => {
                        match job {
                            Some(job) => Self::execute_job(&handler, job).await,
                            None => {
                                tracing::debug!("Worker queue closed");
                                break;
                            }
                        }
                    }
                }
            }

            receiver
        });

        Dispatcher { handle, shutdown }
    }

    async fn execute_job(handler: &WorkerJobHandler, job: WorkerJob) {
        match handler.handle(&job).await {
            Ok(()) => tracing::debug!("Job completed: {}", job),
            Err(e) => tracing::error!("Job failed: {}, error: {}", job, e),
        }
    }

    /// Stops the dispatcher after its current job, if any.
    ///
    /// Idempotent: calling it while stopped returns immediately.
    pub async fn stop(&self) -> Result<(), Error> {
        let Some(dispatcher) = self.inner.dispatcher.lock().await.take() else {
            tracing::debug!("Worker is already stopped");
            return Ok(());
        };

        tracing::info!("Shutting down worker...");

        // notify_one stores a permit if the dispatcher is mid-job
        dispatcher.shutdown.notify_one();

        match tokio::time::timeout(SHUTDOWN_TIMEOUT, dispatcher.handle).await {
            Ok(Ok(receiver)) => {
                *self.inner.receiver.lock().await = Some(receiver);
                tracing::info!("Worker stopped");
            }
            Ok(Err(e)) => tracing::error!("Dispatcher panicked: {:?}", e),
            Err(_) => tracing::warn!("Dispatcher did not stop within timeout"),
        }

        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        self.inner.dispatcher.lock().await.is_some()
    }
}
