//! Operation submission
//!
//! Validates a batch request, creates the pending record and launches the
//! detached processor. Returns immediately; callers learn everything after
//! this point by polling.

use super::processor::BatchProcessor;
use super::registry::OperationRegistry;
use super::types::{BatchOperation, OperationKind, OperationStatus, SubmitOptions};
use crate::utils::error::{Result, ServiceError};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Immediate response to a successful submission
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    /// Id of the created operation
    pub operation_id: String,
    /// Always `pending` at submission time
    pub status: OperationStatus,
    /// Resource to poll for progress
    pub tracking_resource: String,
}

/// Validates submissions and launches processing
pub struct OperationSubmitter {
    registry: Arc<dyn OperationRegistry>,
    processor: Arc<BatchProcessor>,
}

impl OperationSubmitter {
    /// Create a submitter over the registry and processor
    pub fn new(registry: Arc<dyn OperationRegistry>, processor: Arc<BatchProcessor>) -> Self {
        Self {
            registry,
            processor,
        }
    }

    /// Submit a batch operation
    ///
    /// Fails with a validation error, creating no record, if `item_ids` is
    /// empty or `kind` is not a recognized operation kind. Order and
    /// duplicates in `item_ids` are preserved.
    pub async fn submit(
        &self,
        item_ids: Vec<String>,
        kind: &str,
        options: SubmitOptions,
    ) -> Result<SubmitReceipt> {
        if item_ids.is_empty() {
            return Err(ServiceError::validation("itemIds must not be empty"));
        }

        let kind = OperationKind::parse(kind)
            .ok_or_else(|| ServiceError::validation(format!("unknown operation kind: {}", kind)))?;

        let operation_id = Self::generate_id(kind);
        info!(
            "Submitting {} operation {} with {} items",
            kind,
            operation_id,
            item_ids.len()
        );

        let operation =
            BatchOperation::new(operation_id.clone(), kind, item_ids.len(), options);
        self.registry.create(operation).await?;

        self.processor.spawn(operation_id.clone(), item_ids);

        Ok(SubmitReceipt {
            operation_id: operation_id.clone(),
            status: OperationStatus::Pending,
            tracking_resource: format!("/api/operations/{}", operation_id),
        })
    }

    // kind + timestamp + random suffix keeps ids sortable and unique
    fn generate_id(kind: OperationKind) -> String {
        let suffix: String = Uuid::new_v4().simple().to_string()[..8].to_string();
        format!("{}_{}_{}", kind, Utc::now().timestamp_millis(), suffix)
    }
}
