//! REST API layer serving the dashboard front end

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use handlers::{DashboardResponse, ExportResponse, InitRequest};
pub use routes::create_router;
pub use state::AppState;

use crate::generator::GeneratorConfig;
use crate::store::SalesStore;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host address (default: "127.0.0.1")
    pub host: String,
    /// Server port (default: 3000)
    pub port: u16,
    /// Path to the SQLite store
    pub database_path: String,
    /// Directory CSV exports are written into
    pub export_dir: PathBuf,
    /// Generation settings applied when a client POSTs /init
    pub generator_config: GeneratorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_path: "dashboard.db".to_string(),
            export_dir: PathBuf::from("exports"),
            generator_config: GeneratorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Creates a new server configuration with default generation settings
    pub fn new(host: impl Into<String>, port: u16, database_path: impl Into<String>) -> Self {
        ServerConfig {
            host: host.into(),
            port,
            database_path: database_path.into(),
            ..ServerConfig::default()
        }
    }
}

/// Runs the API server
///
/// # Arguments
/// * `config` - Server configuration
///
/// # Returns
/// Returns an error if the server fails to start or encounters a fatal error
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    // Open the store (creates the schema on first use)
    let store = SalesStore::open(&config.database_path)?;

    // Create application state
    let state = AppState::new(store, config.generator_config.clone(), config.export_dir.clone());

    // Create router
    let app = routes::create_router(state);

    // Build server address
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    // Run server
    axum::serve(listener, app).await?;

    Ok(())
}
