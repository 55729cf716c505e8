use std::sync::Arc;

use donation_whistle::server::{
    config::Config,
    error::Error,
    model::app::{AppSettings, AppState},
    router, startup,
    service::cache::ResponseCache,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;
    let cache = ResponseCache::new();
    let worker = startup::start_worker(&config, db.clone(), cache.clone()).await?;

    let state = AppState {
        db,
        cache,
        queue: worker.queue().clone(),
        settings: Arc::new(AppSettings {
            raw_data_path: config.raw_data_path.clone(),
            alias_import_mode: config.alias_import_mode,
        }),
    };
    let app = router::routes().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    let served = axum::serve(listener, app).await;

    worker.stop().await?;

    Ok(served?)
}
