//! Batch processor
//!
//! Drives one operation through its items, detached from the request that
//! created it. Items run strictly sequentially in submission order; the full
//! record is written back to the registry after every item so pollers see
//! live progress. Per-item faults (executor errors, panics, timeouts) become
//! item error entries and never abort the remainder of the batch.

use super::classifier::OutcomeClassifier;
use super::directory::ItemDirectory;
use super::registry::OperationRegistry;
use super::types::{BatchItemResult, ItemOutcome, ItemStatus, OperationKind, SubmitOptions};
use super::work::WorkExecutor;
use crate::config::BatchConfig;
use crate::utils::error::{Result, ServiceError};
use chrono::Utc;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

/// Detached task driving one batch operation
pub struct BatchProcessor {
    registry: Arc<dyn OperationRegistry>,
    executor: Arc<dyn WorkExecutor>,
    classifier: Arc<dyn OutcomeClassifier>,
    directory: Arc<dyn ItemDirectory>,
    // Bounds how many operations process at the same time
    permits: Arc<Semaphore>,
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a processor over the given collaborators
    pub fn new(
        registry: Arc<dyn OperationRegistry>,
        executor: Arc<dyn WorkExecutor>,
        classifier: Arc<dyn OutcomeClassifier>,
        directory: Arc<dyn ItemDirectory>,
        config: BatchConfig,
    ) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent_operations));
        Self {
            registry,
            executor,
            classifier,
            directory,
            permits,
            config,
        }
    }

    /// Launch the supervised detached task for one operation
    ///
    /// Anything that escapes the per-item boundary transitions the operation
    /// to `failed` with its partial results preserved; the fault is logged,
    /// never dropped.
    pub fn spawn(self: &Arc<Self>, operation_id: String, item_ids: Vec<String>) {
        let processor = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = processor.run(&operation_id, &item_ids).await {
                error!("Batch processing failed for {}: {}", operation_id, e);
                processor.mark_failed(&operation_id).await;
            }
        });
    }

    /// Process one operation to completion
    pub async fn run(&self, operation_id: &str, item_ids: &[String]) -> Result<()> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ServiceError::internal("worker pool is shut down"))?;

        info!("Processing operation: {}", operation_id);

        let mut operation = self
            .registry
            .get(operation_id)
            .await
            .ok_or_else(|| ServiceError::not_found(format!("operation {} not found", operation_id)))?;

        let kind = operation.kind;
        let options = operation.options.clone();
        let estimate = Utc::now()
            + chrono::Duration::milliseconds(
                item_ids.len() as i64 * self.config.assumed_item_duration_ms as i64,
            );
        operation.begin_processing(estimate);
        self.registry.update(operation.clone()).await?;

        for item_id in item_ids {
            debug!("Processing item {} of operation {}", item_id, operation_id);

            let label = self.directory.label_for(item_id).await;
            let outcome = self.item_outcome(item_id, &label, kind, &options).await;

            operation.record_item(BatchItemResult::from_outcome(
                item_id.clone(),
                label,
                outcome,
            ));
            // Persist the snapshot so concurrent pollers see this item
            self.registry.update(operation.clone()).await?;
        }

        operation.complete();
        self.registry.update(operation.clone()).await?;

        info!(
            "Operation {} completed (successful: {}, failed: {}, warnings: {})",
            operation_id,
            operation.summary.successful,
            operation.summary.failed,
            operation.summary.warnings
        );

        Ok(())
    }

    /// Run one item inside the supervised boundary and classify the result
    async fn item_outcome(
        &self,
        item_id: &str,
        label: &str,
        kind: OperationKind,
        options: &SubmitOptions,
    ) -> ItemOutcome {
        let work = AssertUnwindSafe(self.executor.execute(item_id, kind, options)).catch_unwind();

        let executed = match self.config.item_timeout(kind.as_str()) {
            Some(limit) => match tokio::time::timeout(limit, work).await {
                Ok(result) => result,
                Err(_) => {
                    return Self::error_outcome(
                        label,
                        format!("timed out after {}ms", limit.as_millis()),
                    );
                }
            },
            None => work.await,
        };

        match executed {
            Ok(Ok(result)) => self.classifier.classify(label, kind, &result),
            Ok(Err(e)) => Self::error_outcome(label, format!("work executor failed: {}", e)),
            Err(_) => Self::error_outcome(label, "work executor panicked".to_string()),
        }
    }

    fn error_outcome(label: &str, reason: String) -> ItemOutcome {
        ItemOutcome {
            status: ItemStatus::Error,
            message: format!("Failed to process {}", label),
            artifact_ref: None,
            errors: Some(vec![reason]),
        }
    }

    async fn mark_failed(&self, operation_id: &str) {
        if let Some(mut operation) = self.registry.get(operation_id).await {
            operation.fail();
            if let Err(e) = self.registry.update(operation).await {
                error!("Could not mark operation {} as failed: {}", operation_id, e);
            }
        }
    }
}
