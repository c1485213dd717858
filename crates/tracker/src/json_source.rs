//! JSON export-file source.
//!
//! Reads issues previously exported from the tracker, either as a bare array
//! of issues or as a search response with an `issues` array. Each issue uses
//! the REST wire shape with an expanded changelog.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use burndown_core::WorkItem;
use serde::Deserialize;
use tokio::fs;
use tracing::info;

use super::{ItemSource, Result};
use crate::wire::IssueRecord;

/// File-based item source.
pub struct JsonFileSource {
    path: PathBuf,
    size_field: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExportDocument {
    Issues(Vec<IssueRecord>),
    Search { issues: Vec<IssueRecord> },
}

impl JsonFileSource {
    /// Create a source reading `path`, sizing items from `size_field`.
    pub fn new(path: impl AsRef<Path>, size_field: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            size_field: size_field.into(),
        }
    }

    /// File this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ItemSource for JsonFileSource {
    async fn fetch_items(&self) -> Result<Vec<WorkItem>> {
        let content = fs::read_to_string(&self.path).await?;
        let records = match serde_json::from_str::<ExportDocument>(&content)? {
            ExportDocument::Issues(records) => records,
            ExportDocument::Search { issues } => issues,
        };

        info!(path = %self.path.display(), issues = records.len(), "Loaded exported issues");

        Ok(records
            .into_iter()
            .map(|record| record.into_work_item(&self.size_field))
            .collect())
    }
}
