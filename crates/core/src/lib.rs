//! Burndown core data models.
//!
//! This crate defines the work items and change events delivered by the
//! issue tracker, and the report configuration shared by every stage.

#![warn(missing_docs)]

// Identities
mod id;

// Tracker data
mod item;
mod event;

// Configuration
pub mod config;

// Re-exports
pub use id::ItemKey;
pub use item::{WorkItem, RawChangeEvent};
pub use event::{ChangeEvent, TIMESTAMP_FORMAT};
pub use config::{ReportConfig, TrackerConfig, ConfigError};

/// Timestamp type for tracker events (keeps the offset they were logged with).
pub type Time = chrono::DateTime<chrono::FixedOffset>;

/// Calendar date type for checkpoints and projections.
pub type Date = chrono::NaiveDate;
