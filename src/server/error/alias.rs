use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Errors raised by alias ledger operations.
///
/// All of these are caused by the request rather than the server, so each maps to a 4xx
/// response carrying the error message.
#[derive(Error, Debug)]
pub enum AliasError {
    /// Another alias already uses the requested name and no donor in the operation shares it.
    #[error("An alias named {0:?} already exists")]
    DuplicateAliasName(String),
    /// An uploaded alias ledger could not be parsed.
    #[error("Failed to parse alias ledger upload: {0}")]
    MalformedInput(String),
    /// The referenced alias does not exist.
    #[error("Donor alias ID {0} does not exist")]
    UnknownAlias(i32),
    /// The referenced donor does not exist.
    #[error("Donor ID {0} does not exist")]
    UnknownDonor(i32),
    /// The donor is owned by a different alias than the one named in the request.
    #[error("Donor ID {donor_id} is not part of donor alias ID {alias_id}")]
    DonorNotInAlias { alias_id: i32, donor_id: i32 },
    /// An alias was requested without any donors.
    #[error("An alias must contain at least one donor")]
    NoDonors,
    /// An alias name was blank.
    #[error("Alias name must not be empty")]
    EmptyName,
    /// A strict ledger upload named donors that do not exist.
    #[error("Alias ledger upload references unknown donors: {0:?}")]
    UnmatchedDonorName(Vec<String>),
}

impl IntoResponse for AliasError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let status = match self {
            Self::DuplicateAliasName(_) => StatusCode::CONFLICT,
            Self::UnknownAlias(_) | Self::UnknownDonor(_) => StatusCode::NOT_FOUND,
            Self::MalformedInput(_)
            | Self::DonorNotInAlias { .. }
            | Self::NoDonors
            | Self::EmptyName
            | Self::UnmatchedDonorName(_) => StatusCode::BAD_REQUEST,
        };

        error_response(status, self)
    }
}
