//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{PersistenceGateway, PortfolioService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{FileKeyValueStore, FileSystem, KeyValueStore, RealFileSystem};

/// Container holding shared dependencies.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Snapshot storage
    pub store: Arc<dyn KeyValueStore>,
}

impl ServiceContainer {
    /// Create a new service container backed by files in `settings.data_dir`.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let store = Arc::new(FileKeyValueStore::new(fs, settings.data_dir.clone()));
        Self::with_deps(settings, store)
    }

    /// Create a service container with a custom store (for testing).
    pub fn with_deps(settings: Settings, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            settings: Arc::new(settings),
            store,
        }
    }

    pub fn gateway(&self) -> PersistenceGateway {
        PersistenceGateway::new(
            Arc::clone(&self.store),
            self.settings.live_key.clone(),
            self.settings.backup_key.clone(),
        )
    }

    /// Open the portfolio; this loads, derives and re-stores the live snapshot.
    pub fn portfolio(&self) -> ApplicationResult<PortfolioService> {
        PortfolioService::open(
            self.gateway(),
            self.settings.presenter(),
            self.settings.new_node_name.clone(),
        )
    }
}
