//! Report configuration - what goes into the burndown and how it is computed.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Date;

/// Format of calendar dates in the configuration (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema
    #[error("failed to parse config {path}: {source}")]
    Json {
        /// File that was parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A field failed validation
    #[error("invalid config field '{field}': {reason}")]
    Invalid {
        /// Field path, e.g. `jira.done_statuses`
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Top-level report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Where the rendered report is written
    #[serde(default)]
    pub output_file: String,

    /// First weekly checkpoint (`YYYY-MM-DD`)
    #[serde(default)]
    pub start_date: String,

    /// Tracker query selecting the items
    #[serde(default)]
    pub jql: String,

    /// Moving average window, in weeks
    #[serde(default)]
    pub moving_avg_weeks: u32,

    /// Tracker connection and field mapping
    #[serde(rename = "jira")]
    pub tracker: TrackerConfig,
}

/// Issue tracker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL, e.g. `https://example.atlassian.net`
    #[serde(rename = "jira_url", default)]
    pub url: String,

    /// Account used for basic auth
    #[serde(default)]
    pub username: String,

    /// API token used for basic auth
    #[serde(default)]
    pub api_token: String,

    /// Field holding the item size
    #[serde(default)]
    pub size_field: String,

    /// Field whose changes record percent complete
    #[serde(default)]
    pub percent_complete_field: String,

    /// Divisor turning a logged percent value into a fraction
    #[serde(default = "default_percent_scale")]
    pub percent_complete_scale: f64,

    /// Status names meaning the item is finished
    #[serde(default)]
    pub done_statuses: Vec<String>,
}

fn default_percent_scale() -> f64 {
    100.0
}

impl ReportConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that every required field is present and well formed.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        required("output_file", &self.output_file)?;
        required("start_date", &self.start_date)?;
        self.start_date()?;
        required("jql", &self.jql)?;
        if self.moving_avg_weeks == 0 {
            return Err(invalid("moving_avg_weeks", "must be at least 1"));
        }

        let tracker = &self.tracker;
        required("jira.jira_url", &tracker.url)?;
        let url_pattern = Regex::new(r"^https?://[^\s/?#]+[^\s]*$")
            .map_err(|e| invalid("jira.jira_url", e.to_string()))?;
        if !url_pattern.is_match(&tracker.url) {
            return Err(invalid("jira.jira_url", format!("'{}' is not an http(s) URL", tracker.url)));
        }
        required("jira.username", &tracker.username)?;
        required("jira.api_token", &tracker.api_token)?;
        required("jira.size_field", &tracker.size_field)?;
        required("jira.percent_complete_field", &tracker.percent_complete_field)?;
        if !tracker.percent_complete_scale.is_finite() || tracker.percent_complete_scale <= 0.0 {
            return Err(invalid("jira.percent_complete_scale", "must be a positive number"));
        }
        if tracker.done_statuses.is_empty() {
            return Err(invalid("jira.done_statuses", "needs at least one status"));
        }

        Ok(())
    }

    /// The parsed reporting start date.
    pub fn start_date(&self) -> Result<Date, ConfigError> {
        Date::parse_from_str(&self.start_date, DATE_FORMAT).map_err(|_| {
            invalid("start_date", format!("'{}' is not a YYYY-MM-DD date", self.start_date))
        })
    }

    /// Browser URL of a ticket.
    pub fn ticket_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.tracker.url.trim_end_matches('/'), key)
    }

    /// Whether the status counts as done.
    pub fn is_done_status(&self, status: &str) -> bool {
        self.tracker.done_statuses.iter().any(|s| s == status)
    }
}

fn required(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "is required"));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
