//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories inside transactions and own the rules of the donation
//! ledger: identity resolution for imported donors, the donor alias ledger and the CSV import
//! pipeline. Read-heavy alias views are served through the shared response cache.

pub mod alias;
pub mod cache;
pub mod identity;
pub mod import;
