//! Worker queue error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

/// Worker queue error type.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The worker's receiving end has shut down, so no job can be dispatched.
    #[error("Worker queue is closed, job {0} could not be dispatched")]
    QueueClosed(i32),
    /// No import job exists with the requested ID.
    #[error("Import job ID {0} does not exist")]
    JobNotFound(i32),
}

impl IntoResponse for WorkerError {
    fn into_response(self) -> Response {
        match self {
            Self::JobNotFound(_) => {
                tracing::debug!("{}", self);

                error_response(StatusCode::NOT_FOUND, self)
            }
            err => InternalServerError(err).into_response(),
        }
    }
}
