//! Utility functions and constants shared across services.

pub mod reference;
