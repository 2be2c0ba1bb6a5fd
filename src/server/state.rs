//! Shared application state for the API server

use crate::generator::GeneratorConfig;
use crate::store::SalesStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Sales store for querying persisted data.
    /// Wrapped in Mutex because SQLite connections are not thread-safe.
    pub store: Arc<Mutex<SalesStore>>,
    /// Generation settings used when the client requests re-initialization
    pub generator_config: GeneratorConfig,
    /// Destination directory for CSV exports
    pub export_dir: PathBuf,
}

impl AppState {
    /// Creates a new application state
    pub fn new(store: SalesStore, generator_config: GeneratorConfig, export_dir: PathBuf) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
            generator_config,
            export_dir,
        }
    }
}
