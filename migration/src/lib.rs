pub use sea_orm_migration::prelude::*;

mod m20251101_000001_donor_type;
mod m20251101_000002_donation_type;
mod m20251101_000003_recipient;
mod m20251101_000004_donor_alias;
mod m20251101_000005_donor;
mod m20251101_000006_donation;
mod m20251101_000007_import_job;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_donor_type::Migration),
            Box::new(m20251101_000002_donation_type::Migration),
            Box::new(m20251101_000003_recipient::Migration),
            Box::new(m20251101_000004_donor_alias::Migration),
            Box::new(m20251101_000005_donor::Migration),
            Box::new(m20251101_000006_donation::Migration),
            Box::new(m20251101_000007_import_job::Migration),
        ]
    }
}
