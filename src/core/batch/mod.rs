//! Asynchronous batch operation orchestration
//!
//! A submission creates a [`BatchOperation`] record, detaches a
//! [`BatchProcessor`] task to work through the items sequentially, and the
//! record stays readable through the [`OperationRegistry`] so pollers see
//! live progress after every item. One item failing never aborts the rest
//! of the batch.

pub mod classifier;
pub mod directory;
pub mod processor;
pub mod registry;
pub mod status;
pub mod submitter;
pub mod types;
pub mod work;


pub use classifier::{KindClassifier, OutcomeClassifier};
pub use directory::{ItemDirectory, StaticDirectory};
pub use processor::BatchProcessor;
pub use registry::{InMemoryRegistry, OperationRegistry};
pub use status::StatusReader;
pub use submitter::{OperationSubmitter, SubmitReceipt};
pub use types::{
    BatchItemResult, BatchOperation, BatchSummary, ItemOutcome, ItemStatus, OperationKind,
    OperationStatus, SubmitOptions,
};
pub use work::{SimulatedExecutor, WorkExecutor, WorkResult};
