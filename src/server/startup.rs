use sea_orm::DatabaseConnection;

use crate::server::{config::Config, error::Error, service::cache::ResponseCache, worker::Worker};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Create the import worker and start its dispatcher
pub async fn start_worker(
    config: &Config,
    db: DatabaseConnection,
    cache: ResponseCache,
) -> Result<Worker, Error> {
    let worker = Worker::new(db, cache, config.import_progress_interval);
    worker.start().await?;

    Ok(worker)
}
