//! HTTP controller endpoints for the donation API.
//!
//! Axum handlers for the donor alias ledger and the donation import worker. Controllers extract
//! request data, call into the service layer and map results to JSON responses. Every handler
//! is annotated with utoipa for the OpenAPI document served at `/api/docs`.

pub mod alias;
pub mod import;
