//! Database model type aliases.
//!
//! Short names for the SeaORM models in the `entity` crate, used by the services and worker.

/// A user-curated identity grouping one or more donor records.
pub type DonorAliasModel = entity::donor_alias::Model;

/// A distinct donor name as it appears in the source records.
///
/// # Fields (from `entity::donor::Model`)
/// - `id` - Primary key
/// - `name` - Cleaned donor name (unique)
/// - `donor_type_id` - Foreign key to the donor's category
/// - `alias_id` - Foreign key to the owning alias, every donor has exactly one
/// - `external_donor_id`, `external_entity_id`, `postcode`, `company_registration_number` -
///   Metadata captured from the first record that introduced the donor
pub type DonorModel = entity::donor::Model;

/// Persisted state of a background donation import.
pub type ImportJobModel = entity::import_job::Model;
