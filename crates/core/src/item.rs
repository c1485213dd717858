//! Work item model - a tracked ticket and its raw changelog.

use serde::{Deserialize, Serialize};
use crate::id::ItemKey;

/// A work item as delivered by the issue tracker.
///
/// The status, type and assignee are the tracker's current snapshot; history
/// is reconstructed from `changelog` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    /// Stable key
    pub key: ItemKey,

    /// One-line summary
    pub summary: String,

    /// Current status name
    pub status: String,

    /// Issue type name
    pub issue_type: String,

    /// Current assignee display name (empty when unassigned)
    pub assignee: String,

    /// Size of the item (story points or similar), 0 when not set
    pub size: f64,

    /// Field changes in tracker order, timestamps still unparsed
    pub changelog: Vec<RawChangeEvent>,
}

impl WorkItem {
    /// Create an item with an empty changelog.
    pub fn new(key: impl Into<ItemKey>, size: f64) -> Self {
        Self {
            key: key.into(),
            summary: String::new(),
            status: String::new(),
            issue_type: String::new(),
            assignee: String::new(),
            size,
            changelog: Vec::new(),
        }
    }

    /// Append a change to the changelog.
    pub fn with_change(mut self, change: RawChangeEvent) -> Self {
        self.changelog.push(change);
        self
    }
}

/// A single field change as the tracker reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawChangeEvent {
    /// Changed field identifier (`status`, `customfield_10200`, ...)
    pub field: String,

    /// Previous value rendered as a string
    pub from_value: String,

    /// New value rendered as a string
    pub to_value: String,

    /// Tracker timestamp, e.g. `2024-03-05T14:07:33.120+0100`
    pub created: String,
}

impl RawChangeEvent {
    /// Create a raw change event.
    pub fn new(
        field: impl Into<String>,
        from_value: impl Into<String>,
        to_value: impl Into<String>,
        created: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            from_value: from_value.into(),
            to_value: to_value.into(),
            created: created.into(),
        }
    }
}
