//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::{
    BatchProcessor, InMemoryRegistry, KindClassifier, OperationSubmitter, SimulatedExecutor,
    StaticDirectory, StatusReader,
};
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across threads.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Batch submission entry point
    pub submitter: Arc<OperationSubmitter>,
    /// Read-only status API
    pub status: Arc<StatusReader>,
}

impl AppState {
    /// Create an AppState with the default production wiring
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(InMemoryRegistry::new());
        let processor = Arc::new(BatchProcessor::new(
            registry.clone(),
            Arc::new(SimulatedExecutor::new(config.batch.simulation.clone())),
            Arc::new(KindClassifier::new()),
            Arc::new(StaticDirectory::default()),
            config.batch.clone(),
        ));

        Self {
            config: Arc::new(config.clone()),
            submitter: Arc::new(OperationSubmitter::new(registry.clone(), processor)),
            status: Arc::new(StatusReader::new(registry, config.batch.list_limit)),
        }
    }

    /// Create an AppState over pre-built components
    ///
    /// Used by tests to inject deterministic executors and fake registries.
    pub fn with_components(
        config: Config,
        submitter: Arc<OperationSubmitter>,
        status: Arc<StatusReader>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            submitter,
            status,
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
