//! Progress reconstruction and projection.
//!
//! Replays each work item's changelog into a completion timeline, samples
//! the timelines at weekly checkpoints, and projects completion dates from
//! the resulting earned-value series.

#![warn(missing_docs)]

pub mod error;
pub mod history;
pub mod checkpoint;
pub mod matrix;
pub mod stats;
pub mod calendar;
pub mod projection;
pub mod report;

pub use error::{ProgressError, Result};
pub use history::{HistoryReconstructor, WorkItemHistory, CompletionTimeline, STATUS_FIELD};
pub use checkpoint::week_checkpoints;
pub use matrix::{CompletionMatrix, MatrixRow};
pub use calendar::add_business_days;
pub use projection::{ProjectionEngine, ProjectionRow, ProjectedDate};
pub use report::{ReportBuilder, BurndownReport};
