//! `carelogd` — the carelog server binary.
//!
//! Usage:
//!   carelogd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/carelog/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod config;
mod cors;
mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use carelog_core::Module;
use carelog_sql::{SQLStore, SqliteStore};
use pantry::PantryModule;
use pantry::service::PantryService;

use config::ServerConfig;

/// Carelog server.
#[derive(Parser, Debug)]
#[command(name = "carelogd", about = "Care-facility record-keeping server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides default 0.0.0.0:8080).
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;

    // Initialize storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let core_config = carelog_core::ServiceConfig {
        data_dir: Some(data_dir),
        sqlite_path: server_config.storage.sqlite_path.clone().map(Into::into),
        listen: cli.listen.clone(),
    };

    let sql: Arc<dyn SQLStore> = Arc::new(
        SqliteStore::open(&core_config.resolve_sqlite_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    // Initialize modules.
    let pantry_module = PantryModule::new(
        PantryService::new(Arc::clone(&sql))
            .map_err(|e| anyhow::anyhow!("failed to initialize pantry module: {}", e))?,
    );
    info!("Pantry module initialized");

    let module_routes = vec![(pantry_module.name(), pantry_module.routes())];

    // Build router.
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&core_config.listen).await?;
    info!("Carelog server listening on {}", core_config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
