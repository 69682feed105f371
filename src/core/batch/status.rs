//! Read-only status API
//!
//! Serves point-in-time snapshots of operations to pollers. Never mutates
//! the registry.

use super::registry::OperationRegistry;
use super::types::BatchOperation;
use crate::utils::error::{Result, ServiceError};
use std::sync::Arc;

/// Default and maximum number of operations returned by listings
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Read-only snapshot and listing API over the registry
pub struct StatusReader {
    registry: Arc<dyn OperationRegistry>,
    list_limit: usize,
}

impl StatusReader {
    /// Create a reader capped at `list_limit` entries per listing
    pub fn new(registry: Arc<dyn OperationRegistry>, list_limit: usize) -> Self {
        Self {
            registry,
            list_limit,
        }
    }

    /// Snapshot of one operation
    pub async fn get_operation(&self, id: &str) -> Result<BatchOperation> {
        self.registry
            .get(id)
            .await
            .ok_or_else(|| ServiceError::not_found(format!("operation {} not found", id)))
    }

    /// Most recently started operations, newest first
    ///
    /// `limit` is clamped to the configured maximum.
    pub async fn list_recent(&self, limit: Option<usize>) -> Vec<BatchOperation> {
        let limit = limit.unwrap_or(self.list_limit).min(self.list_limit);
        self.registry.list_recent(limit).await
    }
}
