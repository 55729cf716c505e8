//! Declarative test builder.
//!
//! Configuration methods queue tables and fixtures, all of which are created during the final
//! `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// ```ignore
/// let test = TestBuilder::new()
///     .with_ledger_tables()
///     .with_donor("Jane Doe")
///     .with_alias("Acme Group", &["Acme Ltd", "Acme Holdings Ltd"])
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_ledger_tables: bool,
    include_reference_types: bool,

    // Singleton donors, each in an alias of its own name
    donors: Vec<String>,
    // (alias_name, donor_names)
    aliases: Vec<(String, Vec<String>)>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every table used by the donation ledger.
    ///
    /// Creates DonorType, DonationType, Recipient, DonorAlias, Donor, Donation and ImportJob,
    /// ordered so foreign keys always reference an existing table.
    pub fn with_ledger_tables(mut self) -> Self {
        self.include_ledger_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Chain multiple calls to add multiple tables.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Seed the full donor and donation type lists.
    pub fn with_reference_types(mut self) -> Self {
        self.include_reference_types = true;
        self
    }

    /// Insert a donor owned by a singleton alias of the same name.
    pub fn with_donor(mut self, name: &str) -> Self {
        self.donors.push(name.to_string());
        self
    }

    /// Insert an alias grouping newly created donors with the given names.
    pub fn with_alias(mut self, alias_name: &str, donor_names: &[&str]) -> Self {
        self.aliases.push((
            alias_name.to_string(),
            donor_names.iter().map(|name| name.to_string()).collect(),
        ));
        self
    }

    /// Build the test context, creating all queued tables and fixtures.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test environment
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_ledger_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::DonorType),
                schema.create_table_from_entity(entity::prelude::DonationType),
                schema.create_table_from_entity(entity::prelude::Recipient),
                schema.create_table_from_entity(entity::prelude::DonorAlias),
                schema.create_table_from_entity(entity::prelude::Donor),
                schema.create_table_from_entity(entity::prelude::Donation),
                schema.create_table_from_entity(entity::prelude::ImportJob),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        if self.include_reference_types {
            setup.ledger().insert_reference_types().await?;
        }

        for name in self.donors {
            setup.ledger().insert_donor(&name).await?;
        }

        for (alias_name, donor_names) in self.aliases {
            let names: Vec<&str> = donor_names.iter().map(String::as_str).collect();
            setup
                .ledger()
                .insert_alias_with_donors(&alias_name, &names)
                .await?;
        }

        Ok(setup)
    }
}
