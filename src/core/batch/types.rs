//! Batch operation types and data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of work a batch operation performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Export forms to their delivery format
    Export,
    /// Generate documents from form data
    Generate,
    /// Prepare review packets
    Review,
    /// Finalize filings
    Finalize,
}

impl OperationKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Export => "export",
            OperationKind::Generate => "generate",
            OperationKind::Review => "review",
            OperationKind::Finalize => "finalize",
        }
    }

    /// Parse a wire name, `None` for unrecognized kinds
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "export" => Some(OperationKind::Export),
            "generate" => Some(OperationKind::Generate),
            "review" => Some(OperationKind::Review),
            "finalize" => Some(OperationKind::Finalize),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a batch operation
///
/// Transitions are fixed: pending -> processing -> completed. `Failed` is
/// reserved for catastrophic processor faults; item-level failures stay
/// inside the item list and never fail the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    /// Created, processing not started yet
    Pending,
    /// The detached processor is working through the items
    Processing,
    /// All items processed
    Completed,
    /// Catastrophic processor fault, partial results preserved
    Failed,
}

impl OperationStatus {
    /// Whether the operation has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationStatus::Completed | OperationStatus::Failed)
    }
}

/// Result status of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Item processed cleanly
    Success,
    /// Item failed; recorded, batch continues
    Error,
    /// Item processed with warnings
    Warning,
}

/// Derived counts over the item list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Total items submitted
    pub total: usize,
    /// Items that succeeded
    pub successful: usize,
    /// Items that failed
    pub failed: usize,
    /// Items that succeeded with warnings
    pub warnings: usize,
}

impl BatchSummary {
    /// Count of items processed so far
    pub fn processed(&self) -> usize {
        self.successful + self.failed + self.warnings
    }
}

/// Classified result of one item's work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// Outcome status
    pub status: ItemStatus,
    /// Human-readable outcome message
    pub message: String,
    /// Reference to the produced artifact, absent for errors
    pub artifact_ref: Option<String>,
    /// Error details, present for error and warning outcomes
    pub errors: Option<Vec<String>>,
}

/// Recorded result of one item inside a batch operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    /// Reference to the external entity this item processed
    pub item_id: String,
    /// Denormalized descriptive label
    pub label: String,
    /// Outcome status
    pub status: ItemStatus,
    /// Human-readable outcome message
    pub message: String,
    /// Reference to the produced artifact, absent for errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_ref: Option<String>,
    /// Error details, present for error and warning outcomes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl BatchItemResult {
    /// Build an item result from a classified outcome
    pub fn from_outcome(item_id: String, label: String, outcome: ItemOutcome) -> Self {
        Self {
            item_id,
            label,
            status: outcome.status,
            message: outcome.message,
            artifact_ref: outcome.artifact_ref,
            errors: outcome.errors,
        }
    }
}

/// Free-form submission configuration, echoed on the record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitOptions {
    /// Requested artifact format (e.g. "pdf")
    pub format: Option<String>,
    /// Whether to include attachments in the artifact
    pub include_attachments: Option<bool>,
    /// Recipients to notify on completion
    pub email_recipients: Option<Vec<String>>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// One submitted batch operation and everything a poller needs to track it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOperation {
    /// Opaque unique id, derived from kind + timestamp + random suffix
    pub id: String,
    /// Kind of work performed per item
    pub kind: OperationKind,
    /// Lifecycle status
    pub status: OperationStatus,
    /// Percentage of items processed, 0-100, monotonic non-decreasing
    pub progress: u8,
    /// Append-only item results in submission order
    pub items: Vec<BatchItemResult>,
    /// Derived counts over `items`
    pub summary: BatchSummary,
    /// When the operation was created
    pub start_time: DateTime<Utc>,
    /// Set only when a terminal state is reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Computed when processing starts from item count x assumed duration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_completion_time: Option<DateTime<Utc>>,
    /// Submission options
    pub options: SubmitOptions,
}

impl BatchOperation {
    /// Create a fresh pending record for `total` items
    pub fn new(id: String, kind: OperationKind, total: usize, options: SubmitOptions) -> Self {
        Self {
            id,
            kind,
            status: OperationStatus::Pending,
            progress: 0,
            items: Vec::new(),
            summary: BatchSummary {
                total,
                ..Default::default()
            },
            start_time: Utc::now(),
            end_time: None,
            estimated_completion_time: None,
            options,
        }
    }

    /// Transition pending -> processing and record the completion estimate
    pub fn begin_processing(&mut self, estimated_completion_time: DateTime<Utc>) {
        self.status = OperationStatus::Processing;
        self.estimated_completion_time = Some(estimated_completion_time);
    }

    /// Append one item result and recompute progress and summary
    pub fn record_item(&mut self, item: BatchItemResult) {
        match item.status {
            ItemStatus::Success => self.summary.successful += 1,
            ItemStatus::Error => self.summary.failed += 1,
            ItemStatus::Warning => self.summary.warnings += 1,
        }
        self.items.push(item);
        self.progress = Self::progress_for(self.items.len(), self.summary.total);
    }

    /// Transition processing -> completed
    pub fn complete(&mut self) {
        self.status = OperationStatus::Completed;
        self.progress = 100;
        self.end_time = Some(Utc::now());
    }

    /// Terminal failure after a catastrophic fault; already-recorded items
    /// stay readable
    pub fn fail(&mut self) {
        self.status = OperationStatus::Failed;
        self.end_time = Some(Utc::now());
    }

    fn progress_for(processed: usize, total: usize) -> u8 {
        if total == 0 {
            return 100;
        }
        ((processed as f64 / total as f64) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success_item(id: &str) -> BatchItemResult {
        BatchItemResult {
            item_id: id.to_string(),
            label: format!("Form {}", id),
            status: ItemStatus::Success,
            message: "ok".to_string(),
            artifact_ref: Some(format!("artifacts/{}.pdf", id)),
            errors: None,
        }
    }

    #[test]
    fn test_kind_parse_round_trip() {
        for kind in [
            OperationKind::Export,
            OperationKind::Generate,
            OperationKind::Review,
            OperationKind::Finalize,
        ] {
            assert_eq!(OperationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(OperationKind::parse("delete"), None);
        assert_eq!(OperationKind::parse(""), None);
    }

    #[test]
    fn test_kind_lowercase_on_the_wire() {
        let json = serde_json::to_string(&OperationKind::Export).unwrap();
        assert_eq!(json, "\"export\"");

        let kind: OperationKind = serde_json::from_str("\"finalize\"").unwrap();
        assert_eq!(kind, OperationKind::Finalize);
    }

    #[test]
    fn test_new_operation_is_pending_and_empty() {
        let op = BatchOperation::new(
            "export_1_abc".to_string(),
            OperationKind::Export,
            3,
            SubmitOptions::default(),
        );

        assert_eq!(op.status, OperationStatus::Pending);
        assert_eq!(op.progress, 0);
        assert!(op.items.is_empty());
        assert_eq!(op.summary.total, 3);
        assert_eq!(op.summary.processed(), 0);
        assert!(op.end_time.is_none());
        assert!(op.estimated_completion_time.is_none());
    }

    #[test]
    fn test_record_item_keeps_summary_consistent() {
        let mut op = BatchOperation::new(
            "export_1_abc".to_string(),
            OperationKind::Export,
            3,
            SubmitOptions::default(),
        );

        op.record_item(success_item("a"));
        assert_eq!(op.summary.processed(), op.items.len());
        assert_eq!(op.progress, 33);

        let mut warning = success_item("b");
        warning.status = ItemStatus::Warning;
        warning.errors = Some(vec!["missing signature".to_string()]);
        op.record_item(warning);
        assert_eq!(op.summary.processed(), op.items.len());
        assert_eq!(op.progress, 67);

        let mut error = success_item("c");
        error.status = ItemStatus::Error;
        error.artifact_ref = None;
        error.errors = Some(vec!["render failed".to_string()]);
        op.record_item(error);

        assert_eq!(op.summary.successful, 1);
        assert_eq!(op.summary.warnings, 1);
        assert_eq!(op.summary.failed, 1);
        assert_eq!(op.summary.processed(), 3);
        assert_eq!(op.progress, 100);
    }

    #[test]
    fn test_items_preserve_submission_order() {
        let mut op = BatchOperation::new(
            "export_1_abc".to_string(),
            OperationKind::Export,
            4,
            SubmitOptions::default(),
        );

        // duplicates are preserved too
        for id in ["x", "y", "x", "z"] {
            op.record_item(success_item(id));
        }

        let order: Vec<&str> = op.items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(order, vec!["x", "y", "x", "z"]);
    }

    #[test]
    fn test_complete_sets_terminal_state() {
        let mut op = BatchOperation::new(
            "export_1_abc".to_string(),
            OperationKind::Export,
            1,
            SubmitOptions::default(),
        );
        op.begin_processing(Utc::now());
        assert_eq!(op.status, OperationStatus::Processing);
        assert!(op.estimated_completion_time.is_some());

        op.record_item(success_item("a"));
        op.complete();

        assert_eq!(op.status, OperationStatus::Completed);
        assert!(op.status.is_terminal());
        assert_eq!(op.progress, 100);
        assert!(op.end_time.unwrap() >= op.start_time);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let mut op = BatchOperation::new(
            "export_1_abc".to_string(),
            OperationKind::Export,
            1,
            SubmitOptions::default(),
        );
        op.record_item(success_item("a"));

        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["id"], "export_1_abc");
        assert_eq!(json["kind"], "export");
        assert_eq!(json["status"], "pending");
        assert!(json["startTime"].is_string());
        assert!(json.get("endTime").is_none());
        assert_eq!(json["items"][0]["itemId"], "a");
        assert!(json["items"][0]["artifactRef"].is_string());
        assert!(json["items"][0].get("errors").is_none());
        assert_eq!(json["summary"]["successful"], 1);
    }

    #[test]
    fn test_submit_options_accept_partial_bodies() {
        let options: SubmitOptions = serde_json::from_str(r#"{"format": "pdf"}"#).unwrap();
        assert_eq!(options.format.as_deref(), Some("pdf"));
        assert!(options.include_attachments.is_none());
        assert!(options.email_recipients.is_none());

        let options: SubmitOptions = serde_json::from_str("{}").unwrap();
        assert!(options.format.is_none());
    }
}
