//! Server application models and type definitions.
//!
//! Holds the shared application state, database model type aliases, alias ledger settings,
//! import pipeline result types and worker job definitions.

pub mod alias;
pub mod app;
pub mod db;
pub mod import;
pub mod worker;
