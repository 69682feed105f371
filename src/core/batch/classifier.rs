//! Outcome classification
//!
//! Maps the raw result of one item's work to the `(status, message,
//! artifactRef, errors)` tuple recorded on the operation. Classification is
//! pure so policies are independently testable and swappable.

use super::types::{ItemOutcome, ItemStatus, OperationKind};
use super::work::WorkResult;

/// Pure strategy deciding the recorded outcome of one item
pub trait OutcomeClassifier: Send + Sync {
    /// Classify one item's work result
    fn classify(&self, label: &str, kind: OperationKind, result: &WorkResult) -> ItemOutcome;
}

/// Default classifier with kind-specific messages
#[derive(Default)]
pub struct KindClassifier;

impl KindClassifier {
    /// Create the default classifier
    pub fn new() -> Self {
        Self
    }

    fn success_message(label: &str, kind: OperationKind) -> String {
        match kind {
            OperationKind::Export => format!("Exported {}", label),
            OperationKind::Generate => format!("Generated document for {}", label),
            OperationKind::Review => format!("Review packet prepared for {}", label),
            OperationKind::Finalize => format!("Finalized {}", label),
        }
    }
}

impl OutcomeClassifier for KindClassifier {
    fn classify(&self, label: &str, kind: OperationKind, result: &WorkResult) -> ItemOutcome {
        match result {
            WorkResult::Done { artifact_ref } => ItemOutcome {
                status: ItemStatus::Success,
                message: Self::success_message(label, kind),
                artifact_ref: Some(artifact_ref.clone()),
                errors: None,
            },
            WorkResult::DoneWithWarnings {
                artifact_ref,
                warnings,
            } => ItemOutcome {
                status: ItemStatus::Warning,
                message: format!("{} (with warnings)", Self::success_message(label, kind)),
                artifact_ref: Some(artifact_ref.clone()),
                errors: Some(warnings.clone()),
            },
            WorkResult::Failed { errors } => ItemOutcome {
                status: ItemStatus::Error,
                message: format!("Failed to process {}", label),
                artifact_ref: None,
                errors: Some(errors.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn done() -> WorkResult {
        WorkResult::Done {
            artifact_ref: "artifacts/export/f-1.pdf".to_string(),
        }
    }

    #[test]
    fn test_success_messages_are_kind_specific() {
        let classifier = KindClassifier::new();

        let outcome = classifier.classify("Form F-1", OperationKind::Export, &done());
        assert_eq!(outcome.message, "Exported Form F-1");

        let outcome = classifier.classify("Form F-1", OperationKind::Generate, &done());
        assert_eq!(outcome.message, "Generated document for Form F-1");

        let outcome = classifier.classify("Form F-1", OperationKind::Review, &done());
        assert_eq!(outcome.message, "Review packet prepared for Form F-1");

        let outcome = classifier.classify("Form F-1", OperationKind::Finalize, &done());
        assert_eq!(outcome.message, "Finalized Form F-1");
    }

    #[test]
    fn test_artifact_present_iff_not_error() {
        let classifier = KindClassifier::new();

        let outcome = classifier.classify("Form F-1", OperationKind::Export, &done());
        assert_eq!(outcome.status, ItemStatus::Success);
        assert!(outcome.artifact_ref.is_some());
        assert!(outcome.errors.is_none());

        let outcome = classifier.classify(
            "Form F-1",
            OperationKind::Export,
            &WorkResult::DoneWithWarnings {
                artifact_ref: "artifacts/export/f-1.pdf".to_string(),
                warnings: vec!["low-resolution attachment".to_string()],
            },
        );
        assert_eq!(outcome.status, ItemStatus::Warning);
        assert!(outcome.artifact_ref.is_some());
        assert_eq!(outcome.errors.as_ref().unwrap().len(), 1);

        let outcome = classifier.classify(
            "Form F-1",
            OperationKind::Export,
            &WorkResult::Failed {
                errors: vec!["render failed".to_string()],
            },
        );
        assert_eq!(outcome.status, ItemStatus::Error);
        assert!(outcome.artifact_ref.is_none());
        assert!(outcome.errors.is_some());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = KindClassifier::new();
        let first = classifier.classify("Form F-1", OperationKind::Export, &done());
        let second = classifier.classify("Form F-1", OperationKind::Export, &done());
        assert_eq!(first, second);
    }
}
