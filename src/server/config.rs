//! Server configuration loaded from environment variables.

use std::path::PathBuf;

use crate::server::{error::config::ConfigError, model::alias::AliasImportMode};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_RAW_DATA_PATH: &str = "raw_data.csv";
pub const DEFAULT_IMPORT_PROGRESS_INTERVAL: usize = 100;

pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Location of the Electoral Commission CSV read by donation imports.
    pub raw_data_path: PathBuf,
    /// Number of processed records between progress updates.
    pub import_progress_interval: usize,
    pub alias_import_mode: AliasImportMode,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Unset and empty variables are treated the same way.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let database_url =
            get("DATABASE_URL").ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".into()))?;

        let import_progress_interval = match get("IMPORT_PROGRESS_INTERVAL") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(interval) if interval > 0 => interval,
                _ => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "IMPORT_PROGRESS_INTERVAL".into(),
                        value,
                        reason: "expected a positive integer".into(),
                    })
                }
            },
            None => DEFAULT_IMPORT_PROGRESS_INTERVAL,
        };

        let alias_import_mode = match get("ALIAS_IMPORT_MODE") {
            Some(value) => {
                value
                    .parse()
                    .map_err(|reason| ConfigError::InvalidEnvValue {
                        var: "ALIAS_IMPORT_MODE".into(),
                        value,
                        reason,
                    })?
            }
            None => AliasImportMode::default(),
        };

        Ok(Self {
            database_url,
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.into()),
            raw_data_path: get("RAW_DATA_PATH")
                .unwrap_or_else(|| DEFAULT_RAW_DATA_PATH.into())
                .into(),
            import_progress_interval,
            alias_import_mode,
        })
    }
}
