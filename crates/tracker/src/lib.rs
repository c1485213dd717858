//! Issue tracker sources for burndown reports.
//!
//! This crate provides a trait-based interface for fetching work items with
//! their changelogs, with a Jira REST implementation and a JSON export-file
//! implementation for offline runs.

#![warn(missing_docs)]

pub mod trait_;
pub mod wire;
pub mod json_source;
pub mod jira_source;

pub use trait_::{ItemSource, TrackerError, Result};
pub use json_source::JsonFileSource;
pub use jira_source::JiraSource;
