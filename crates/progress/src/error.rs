//! Errors raised while reconstructing or projecting progress.

use burndown_core::{ConfigError, ItemKey};

/// Result alias for progress operations.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors that abort a report run.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// A changelog timestamp is not in the tracker format
    #[error("item {item}: cannot parse timestamp '{raw}': {source}")]
    TimestampParse {
        /// Item whose changelog is malformed
        item: ItemKey,
        /// Offending timestamp string
        raw: String,
        /// Underlying error
        #[source]
        source: chrono::ParseError,
    },

    /// A percent-complete change does not hold a number
    #[error("item {item}: cannot parse value '{raw}' of field '{field}': {source}")]
    ValueParse {
        /// Item whose changelog is malformed
        item: ItemKey,
        /// Field the value was logged on
        field: String,
        /// Offending value
        raw: String,
        /// Underlying error
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Configuration the report depends on is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Moving average window of zero weeks
    #[error("moving average window must be at least 1 week, got {0}")]
    InvalidWindow(usize),
}
