//! Jira REST wire format.
//!
//! Only the parts of an issue the report reads are modelled; every other
//! field lands in [`IssueFields::other`] so custom fields can be looked up by id.

use std::collections::HashMap;

use burndown_core::{RawChangeEvent, WorkItem};
use serde::{Deserialize, Serialize};

/// An issue with its expanded changelog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Issue key
    pub key: String,

    /// Issue fields
    #[serde(default)]
    pub fields: IssueFields,

    /// Field change history
    #[serde(default)]
    pub changelog: Changelog,
}

/// Standard fields plus everything else keyed by field id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFields {
    /// One-line summary
    #[serde(default)]
    pub summary: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: Option<Named>,

    /// Issue type
    #[serde(default)]
    pub issuetype: Option<Named>,

    /// Assignee, `null` when unassigned
    #[serde(default)]
    pub assignee: Option<Assignee>,

    /// Remaining fields, custom fields among them
    #[serde(flatten)]
    pub other: HashMap<String, serde_json::Value>,
}

impl IssueFields {
    /// Value of a custom field as a number.
    pub fn number(&self, field_id: &str) -> Option<f64> {
        self.other.get(field_id).and_then(serde_json::Value::as_f64)
    }
}

/// An object identified by name (status, issue type).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Named {
    /// Display name
    #[serde(default)]
    pub name: String,
}

/// A user reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assignee {
    /// Display name
    #[serde(rename = "displayName", default)]
    pub display_name: String,
}

/// Changelog wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Changelog {
    /// Change groups
    #[serde(default)]
    pub histories: Vec<History>,
}

/// A group of field changes made together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    /// Timestamp shared by every item in the group
    pub created: String,

    /// Individual field changes
    #[serde(default)]
    pub items: Vec<HistoryItem>,
}

/// One field change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Field name or id
    pub field: String,

    /// Previous value as text
    #[serde(rename = "fromString", default)]
    pub from_value: Option<String>,

    /// New value as text
    #[serde(rename = "toString", default)]
    pub to_value: Option<String>,
}

/// Search endpoint response; only keys are requested.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    /// Issues on this page
    #[serde(default)]
    pub issues: Vec<IssueKey>,
}

/// Bare issue reference from a search.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueKey {
    /// Issue key
    pub key: String,
}

impl IssueRecord {
    /// Convert into a work item, reading the size from `size_field`.
    ///
    /// Missing or non-numeric sizes read as 0.
    pub fn into_work_item(self, size_field: &str) -> WorkItem {
        let size = self.fields.number(size_field).unwrap_or(0.0);
        let changelog = self
            .changelog
            .histories
            .into_iter()
            .flat_map(|history| {
                let created = history.created;
                history.items.into_iter().map(move |item| {
                    RawChangeEvent::new(
                        item.field,
                        item.from_value.unwrap_or_default(),
                        item.to_value.unwrap_or_default(),
                        created.clone(),
                    )
                })
            })
            .collect();

        WorkItem {
            key: self.key.as_str().into(),
            summary: self.fields.summary.unwrap_or_default(),
            status: self.fields.status.map(|s| s.name).unwrap_or_default(),
            issue_type: self.fields.issuetype.map(|t| t.name).unwrap_or_default(),
            assignee: self.fields.assignee.map(|a| a.display_name).unwrap_or_default(),
            size,
            changelog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUE: &str = r#"{
        "key": "PROJ-7",
        "fields": {
            "summary": "Add export",
            "status": {"name": "In Progress"},
            "issuetype": {"name": "Story"},
            "assignee": null,
            "created": "2024-01-01T09:00:00.000+0000",
            "customfield_10016": 5.0,
            "customfield_10200": null
        },
        "changelog": {
            "histories": [
                {
                    "created": "2024-01-03T10:00:00.000+0000",
                    "items": [
                        {"field": "status", "fieldtype": "jira", "fromString": "To Do", "toString": "In Progress"},
                        {"field": "customfield_10200", "fieldtype": "custom", "fromString": null, "toString": "30"}
                    ]
                },
                {
                    "created": "2024-01-02T10:00:00.000+0000",
                    "items": [
                        {"field": "assignee", "fromString": "Ada", "toString": null}
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn test_decode_issue_into_work_item() {
        let record: IssueRecord = serde_json::from_str(ISSUE).unwrap();
        let item = record.into_work_item("customfield_10016");

        assert_eq!(item.key.as_str(), "PROJ-7");
        assert_eq!(item.summary, "Add export");
        assert_eq!(item.status, "In Progress");
        assert_eq!(item.issue_type, "Story");
        assert_eq!(item.assignee, "");
        assert_eq!(item.size, 5.0);
        assert_eq!(item.changelog.len(), 3);
        assert_eq!(
            item.changelog[1],
            RawChangeEvent::new("customfield_10200", "", "30", "2024-01-03T10:00:00.000+0000")
        );
        assert_eq!(item.changelog[2].from_value, "Ada");
        assert_eq!(item.changelog[2].to_value, "");
    }

    #[test]
    fn test_missing_or_textual_size_is_zero() {
        let record: IssueRecord = serde_json::from_str(ISSUE).unwrap();
        assert_eq!(record.clone().into_work_item("customfield_99999").size, 0.0);
        assert_eq!(record.into_work_item("created").size, 0.0);
    }

    #[test]
    fn test_decode_minimal_issue() {
        let record: IssueRecord = serde_json::from_str(r#"{"key": "PROJ-1"}"#).unwrap();
        let item = record.into_work_item("customfield_10016");
        assert_eq!(item.key.as_str(), "PROJ-1");
        assert!(item.changelog.is_empty());
    }

    #[test]
    fn test_decode_search_page() {
        let page: SearchPage =
            serde_json::from_str(r#"{"issues": [{"key": "PROJ-1"}, {"key": "PROJ-2"}], "isLast": true}"#).unwrap();
        let keys: Vec<&str> = page.issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["PROJ-1", "PROJ-2"]);
    }
}
