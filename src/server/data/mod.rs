//! Data access layer repositories.
//!
//! Each repository wraps one entity and is generic over `ConnectionTrait`, so the same
//! repository runs against a plain connection or inside a transaction.

pub mod donation;
pub mod donation_type;
pub mod donor;
pub mod donor_alias;
pub mod donor_type;
pub mod import_job;
pub mod recipient;

/// Most IDs bound into a single `IN (...)` list, keeping large ledgers under the database's
/// bind parameter limit.
pub const ID_BATCH_SIZE: usize = 1_000;
