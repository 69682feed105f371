//! Per-item work execution
//!
//! The real unit of work (document generation, PDF rendering) lives outside
//! this service. [`WorkExecutor`] is the seam it plugs into; the orchestrator
//! only sequences and tracks it. [`SimulatedExecutor`] stands in for the real
//! pipeline with configurable outcome rates.

use super::types::{OperationKind, SubmitOptions};
use crate::config::SimulationConfig;
use crate::utils::error::Result;
use async_trait::async_trait;
use rand::Rng;

/// Raw result of one item's work, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkResult {
    /// Work finished and produced an artifact
    Done {
        /// Reference to the produced artifact
        artifact_ref: String,
    },
    /// Work finished with warnings, artifact still produced
    DoneWithWarnings {
        /// Reference to the produced artifact
        artifact_ref: String,
        /// Warning details
        warnings: Vec<String>,
    },
    /// Work failed for this item
    Failed {
        /// Failure details
        errors: Vec<String>,
    },
}

/// External executor performing the actual unit of work for one item
#[async_trait]
pub trait WorkExecutor: Send + Sync {
    /// Execute the work for one item
    ///
    /// `Err` means the executor itself faulted unexpectedly; the processor
    /// records it as an item error rather than aborting the batch.
    async fn execute(
        &self,
        item_id: &str,
        kind: OperationKind,
        options: &SubmitOptions,
    ) -> Result<WorkResult>;
}

/// Stand-in executor with weighted pseudo-random outcomes
pub struct SimulatedExecutor {
    simulation: SimulationConfig,
}

impl SimulatedExecutor {
    /// Create an executor with the configured outcome rates
    pub fn new(simulation: SimulationConfig) -> Self {
        Self { simulation }
    }

    fn artifact_ref(item_id: &str, kind: OperationKind, options: &SubmitOptions) -> String {
        let extension = options.format.as_deref().unwrap_or("pdf");
        format!("artifacts/{}/{}.{}", kind, item_id, extension)
    }
}

#[async_trait]
impl WorkExecutor for SimulatedExecutor {
    async fn execute(
        &self,
        item_id: &str,
        kind: OperationKind,
        options: &SubmitOptions,
    ) -> Result<WorkResult> {
        let roll: f64 = rand::thread_rng().gen();

        let result = if roll < self.simulation.success_rate {
            WorkResult::Done {
                artifact_ref: Self::artifact_ref(item_id, kind, options),
            }
        } else if roll < self.simulation.success_rate + self.simulation.warning_rate {
            WorkResult::DoneWithWarnings {
                artifact_ref: Self::artifact_ref(item_id, kind, options),
                warnings: vec![format!("{} completed with missing optional fields", item_id)],
            }
        } else {
            WorkResult::Failed {
                errors: vec![format!("processing failed for {}", item_id)],
            }
        };

        Ok(result)
    }
}

#[cfg(test)]
pub mod fixtures {
    //! Deterministic executors for tests

    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Always succeeds, instantly
    pub struct InstantExecutor;

    #[async_trait]
    impl WorkExecutor for InstantExecutor {
        async fn execute(
            &self,
            item_id: &str,
            kind: OperationKind,
            options: &SubmitOptions,
        ) -> Result<WorkResult> {
            Ok(WorkResult::Done {
                artifact_ref: SimulatedExecutor::artifact_ref(item_id, kind, options),
            })
        }
    }

    /// Scripted per-item outcomes; unscripted items succeed
    pub struct ScriptedExecutor {
        outcomes: HashMap<String, WorkResult>,
        delay: Option<Duration>,
    }

    impl ScriptedExecutor {
        pub fn new() -> Self {
            Self {
                outcomes: HashMap::new(),
                delay: None,
            }
        }

        pub fn with_outcome(mut self, item_id: &str, result: WorkResult) -> Self {
            self.outcomes.insert(item_id.to_string(), result);
            self
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl WorkExecutor for ScriptedExecutor {
        async fn execute(
            &self,
            item_id: &str,
            kind: OperationKind,
            options: &SubmitOptions,
        ) -> Result<WorkResult> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self.outcomes.get(item_id).cloned().unwrap_or_else(|| {
                WorkResult::Done {
                    artifact_ref: SimulatedExecutor::artifact_ref(item_id, kind, options),
                }
            }))
        }
    }

    /// Panics on a chosen item; everything else succeeds
    pub struct PanickingExecutor {
        pub panic_on: String,
    }

    #[async_trait]
    impl WorkExecutor for PanickingExecutor {
        async fn execute(
            &self,
            item_id: &str,
            kind: OperationKind,
            options: &SubmitOptions,
        ) -> Result<WorkResult> {
            if item_id == self.panic_on {
                panic!("executor blew up on {}", item_id);
            }
            Ok(WorkResult::Done {
                artifact_ref: SimulatedExecutor::artifact_ref(item_id, kind, options),
            })
        }
    }
}
