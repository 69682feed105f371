//! Item label resolution
//!
//! An external lookup service resolves an item id to the human-readable
//! label denormalized onto each recorded item.

use async_trait::async_trait;

/// External collaborator resolving item ids to descriptive labels
#[async_trait]
pub trait ItemDirectory: Send + Sync {
    /// Resolve the label for one item id
    async fn label_for(&self, item_id: &str) -> String;
}

/// Directory that derives labels from the id itself
///
/// Used until the form-catalog lookup is wired in.
pub struct StaticDirectory {
    prefix: String,
}

impl StaticDirectory {
    /// Create a directory labelling items as "<prefix> <id>"
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for StaticDirectory {
    fn default() -> Self {
        Self::new("Form")
    }
}

#[async_trait]
impl ItemDirectory for StaticDirectory {
    async fn label_for(&self, item_id: &str) -> String {
        format!("{} {}", self.prefix, item_id)
    }
}
