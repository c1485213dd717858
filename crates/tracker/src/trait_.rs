//! Item source trait abstraction.

use async_trait::async_trait;
use burndown_core::WorkItem;

/// Error type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors that can occur while fetching items.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The tracker answered with a non-success status
    #[error("tracker returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnosis
        body: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of work items and their complete changelogs.
///
/// Once `fetch_items` returns, every item's changelog must be complete;
/// pagination and pacing are the source's concern.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch every item selected by the source's query.
    async fn fetch_items(&self) -> Result<Vec<WorkItem>>;
}
