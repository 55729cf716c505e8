//! Data transfer objects shared by the HTTP API.

pub mod alias;
pub mod api;
pub mod import;
