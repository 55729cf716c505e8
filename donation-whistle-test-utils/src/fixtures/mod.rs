//! Test fixtures for database records and raw donation data.
//!
//! - `ledger` - Reference types, recipients, aliases, donors and donations
//! - `record` - Raw Electoral Commission records and CSV payloads

pub mod ledger;
pub mod record;
