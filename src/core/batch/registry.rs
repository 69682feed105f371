//! Operation registry
//!
//! Concurrency-safe keyed store of [`BatchOperation`] records. Writes replace
//! the whole record, so a concurrent reader either sees the previous snapshot
//! or the new one, never a torn write. Only the processor that owns an
//! operation writes to it.

use super::types::BatchOperation;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Injectable store for operation records
#[async_trait]
pub trait OperationRegistry: Send + Sync {
    /// Insert a new record; fails on duplicate id
    async fn create(&self, operation: BatchOperation) -> Result<()>;

    /// Replace an existing record atomically; fails for unknown ids
    async fn update(&self, operation: BatchOperation) -> Result<()>;

    /// Snapshot of one record
    async fn get(&self, id: &str) -> Option<BatchOperation>;

    /// Snapshots of the most recently started operations, newest first
    async fn list_recent(&self, limit: usize) -> Vec<BatchOperation>;

    /// Number of stored records
    async fn count(&self) -> usize;
}

/// In-memory registry backed by an RwLock'd map
///
/// Records are retained for the process lifetime; there is no delete
/// operation.
#[derive(Default)]
pub struct InMemoryRegistry {
    records: RwLock<HashMap<String, BatchOperation>>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OperationRegistry for InMemoryRegistry {
    async fn create(&self, operation: BatchOperation) -> Result<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&operation.id) {
            return Err(ServiceError::conflict(format!(
                "operation {} already exists",
                operation.id
            )));
        }
        records.insert(operation.id.clone(), operation);
        Ok(())
    }

    async fn update(&self, operation: BatchOperation) -> Result<()> {
        let mut records = self.records.write().await;
        if !records.contains_key(&operation.id) {
            return Err(ServiceError::not_found(format!(
                "operation {} not found",
                operation.id
            )));
        }
        records.insert(operation.id.clone(), operation);
        Ok(())
    }

    async fn get(&self, id: &str) -> Option<BatchOperation> {
        let records = self.records.read().await;
        records.get(id).cloned()
    }

    async fn list_recent(&self, limit: usize) -> Vec<BatchOperation> {
        let records = self.records.read().await;
        let mut operations: Vec<BatchOperation> = records.values().cloned().collect();
        operations.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        operations.truncate(limit);
        operations
    }

    async fn count(&self) -> usize {
        let records = self.records.read().await;
        records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::batch::types::{OperationKind, SubmitOptions};
    use chrono::{Duration, Utc};

    fn operation(id: &str) -> BatchOperation {
        BatchOperation::new(
            id.to_string(),
            OperationKind::Export,
            1,
            SubmitOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let registry = InMemoryRegistry::new();
        registry.create(operation("op_1")).await.unwrap();

        let found = registry.get("op_1").await.unwrap();
        assert_eq!(found.id, "op_1");
        assert!(registry.get("op_2").await.is_none());
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_ids() {
        let registry = InMemoryRegistry::new();
        registry.create(operation("op_1")).await.unwrap();

        let result = registry.create(operation("op_1")).await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let registry = InMemoryRegistry::new();
        registry.create(operation("op_1")).await.unwrap();

        let mut updated = operation("op_1");
        updated.begin_processing(Utc::now());
        registry.update(updated).await.unwrap();

        let found = registry.get("op_1").await.unwrap();
        assert_eq!(
            found.status,
            crate::core::batch::types::OperationStatus::Processing
        );
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let registry = InMemoryRegistry::new();
        let result = registry.update(operation("ghost")).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_recent_sorts_and_truncates() {
        let registry = InMemoryRegistry::new();

        for i in 0..5 {
            let mut op = operation(&format!("op_{}", i));
            op.start_time = Utc::now() - Duration::seconds(100 - i);
            registry.create(op).await.unwrap();
        }

        let recent = registry.list_recent(3).await;
        assert_eq!(recent.len(), 3);
        // newest first
        assert_eq!(recent[0].id, "op_4");
        assert_eq!(recent[1].id, "op_3");
        assert_eq!(recent[2].id, "op_2");
    }
}
