//! # OpsDesk
//!
//! Batch operation service behind a professional-services dashboard.
//! The dashboard triggers bulk work (exporting forms, generating documents,
//! preparing review packets, finalizing filings) as a single batch operation;
//! this crate detaches the processing from the triggering request, tolerates
//! per-item failure, and exposes a polling API for live progress and partial
//! results.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use opsdesk::{Config, OpsDesk};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/opsdesk.yaml").await?;
//!     let service = OpsDesk::new(config).await?;
//!     service.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{Result, ServiceError};

pub use core::batch::{
    BatchItemResult, BatchOperation, BatchSummary, InMemoryRegistry, ItemStatus, OperationKind,
    OperationRegistry, OperationStatus, OperationSubmitter, StatusReader, SubmitOptions,
    SubmitReceipt,
};

use tracing::info;

/// A minimal OpsDesk service instance
pub struct OpsDesk {
    config: Config,
    server: server::HttpServer,
}

impl OpsDesk {
    /// Create a new service instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new OpsDesk instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the HTTP server
    pub async fn run(self) -> Result<()> {
        info!("Starting OpsDesk");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await?;

        Ok(())
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
