//! Test context returned by `TestBuilder`.

use sea_orm::{
    sea_query::TableCreateStatement, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection,
};

use crate::error::TestError;

/// Test environment produced by [`TestBuilder::build`](crate::TestBuilder::build).
///
/// ```ignore
/// let test = TestBuilder::new().with_ledger_tables().build().await?;
///
/// let (alias, donor) = test.ledger().insert_donor("Jane Doe").await?;
/// let repo = DonorRepository::new(&test.db);
/// ```
pub struct TestContext {
    /// Connection to an in-memory SQLite database
    pub db: DatabaseConnection,
}

impl TestContext {
    /// Connects to a fresh in-memory SQLite database.
    ///
    /// The pool is limited to one connection so every query sees the same in-memory database.
    pub(crate) async fn new() -> Result<Self, TestError> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);

        let db = Database::connect(opt).await?;

        Ok(TestContext { db })
    }

    /// Executes the given CREATE TABLE statements in order.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Convert the database connection into any type that can be constructed from it.
    ///
    /// Avoids a circular dependency between this crate and the server crate.
    pub fn to_state<T>(&self) -> T
    where
        T: From<DatabaseConnection>,
    {
        T::from(self.db.clone())
    }
}
