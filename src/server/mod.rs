//! Server application core modules.
//!
//! Everything behind the HTTP API: configuration, routing, persistence, the donor alias
//! ledger, the donation import pipeline and the background worker that runs imports.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
pub mod worker;
