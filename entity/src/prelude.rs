pub use super::donation::Entity as Donation;
pub use super::donation_type::Entity as DonationType;
pub use super::donor::Entity as Donor;
pub use super::donor_alias::Entity as DonorAlias;
pub use super::donor_type::Entity as DonorType;
pub use super::import_job::Entity as ImportJob;
pub use super::recipient::Entity as Recipient;
