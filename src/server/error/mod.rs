//! Error types for the donation server.
//!
//! Each domain (alias ledger, donation import, configuration, worker queue) owns an error enum
//! defined with `thiserror`. The top-level [`Error`] aggregates them through `#[from]` so the
//! `?` operator works across layers, and every error implements `IntoResponse` so controllers
//! can return them directly.

pub mod alias;
pub mod config;
pub mod import;
pub mod worker;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        alias::AliasError, config::ConfigError, import::ImportError, worker::WorkerError,
    },
};

/// Main error type for the donation server.
///
/// Aggregates the domain-specific error types and external library errors into one type. The
/// `IntoResponse` implementation defers to the domain errors for their status codes and treats
/// everything else as an internal server error.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Alias ledger error (duplicate names, unknown aliases or donors, malformed uploads).
    #[error(transparent)]
    AliasError(#[from] AliasError),
    /// Donation import error (unparseable records, unknown reference codes, missing source).
    #[error(transparent)]
    ImportError(#[from] ImportError),
    /// Worker queue error (queue closed, unknown job).
    #[error(transparent)]
    WorkerError(#[from] WorkerError),
    /// Internal error indicating a bug in the server's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// I/O error (binding the listener, serving requests).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// JSON serialization error (response cache entries).
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For invalid alias operations or malformed uploads
/// - 404 Not Found - For unknown aliases, donors or import jobs
/// - 409 Conflict - For alias names already in use
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AliasError(err) => err.into_response(),
            Self::ImportError(err) => err.into_response(),
            Self::WorkerError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged while the client only receives a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

/// Builds a JSON error response carrying the error's display message.
pub(crate) fn error_response(status: StatusCode, message: impl ToString) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.to_string(),
        }),
    )
        .into_response()
}
