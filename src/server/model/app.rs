use std::{path::PathBuf, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::server::{
    model::alias::AliasImportMode, service::cache::ResponseCache, worker::queue::WorkerQueue,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cache: ResponseCache,
    pub queue: WorkerQueue,
    pub settings: Arc<AppSettings>,
}

/// Request-time settings taken from [`Config`](crate::server::config::Config).
#[derive(Clone, Debug)]
pub struct AppSettings {
    /// Location of the donation CSV an import reads from.
    pub raw_data_path: PathBuf,
    pub alias_import_mode: AliasImportMode,
}
