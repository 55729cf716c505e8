use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

/// Errors raised while reading or normalizing donation records.
///
/// Any of these aborts the running import batch; records committed before the failure are kept.
#[derive(Error, Debug)]
pub enum ImportError {
    /// A relevant record carried a value that could not be parsed.
    ///
    /// # Fields
    /// - `external_ref` - The record's `ECRef`
    /// - `field` - Source column holding the bad value
    /// - `value` - The raw value
    #[error("Failed to parse {field} {value:?} of donation record {external_ref:?}")]
    RecordParse {
        external_ref: String,
        field: &'static str,
        value: String,
    },
    /// The record's donor status is not one of the known donor categories.
    #[error("Unknown donor status {0:?}")]
    UnknownDonorType(String),
    /// The record's donation type is not one of the known donation categories.
    #[error("Unknown donation type {0:?}")]
    UnknownDonationType(String),
    /// The record source could not be opened or prepared.
    #[error("Donation record source is unavailable: {0}")]
    SourceUnavailable(String),
    /// The CSV reader failed mid-stream.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl IntoResponse for ImportError {
    fn into_response(self) -> Response {
        match self {
            Self::SourceUnavailable(_) => {
                tracing::warn!("{}", self);

                error_response(StatusCode::SERVICE_UNAVAILABLE, self)
            }
            err => InternalServerError(err).into_response(),
        }
    }
}
