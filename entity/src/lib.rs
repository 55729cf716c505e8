pub mod prelude;

pub mod donation;
pub mod donation_type;
pub mod donor;
pub mod donor_alias;
pub mod donor_type;
pub mod import_job;
pub mod recipient;
