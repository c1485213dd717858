//! History reconstruction - completion state of one item as of any date.
//!
//! An item's changelog arrives in no particular order. It is normalized once
//! (timestamps parsed, events stably sorted), and every query then replays the
//! prefix of events up to the end of the requested day:
//! - the running maximum of percent-complete values is the numeric progress
//! - a status change into a done status forces completion to 1.0
//!
//! Each query is independent, so a later date always sees a superset of the
//! events an earlier date sees and the timeline never moves backwards.

use std::collections::HashSet;

use burndown_core::{ChangeEvent, Date, ItemKey, ReportConfig, Time, WorkItem};
use chrono::{Days, FixedOffset, TimeZone};
use tracing::debug;

use crate::error::{ProgressError, Result};

/// Field name the tracker uses for workflow status changes.
pub const STATUS_FIELD: &str = "status";

/// Rules for turning a changelog into completion fractions.
#[derive(Debug, Clone)]
pub struct HistoryReconstructor {
    percent_field: String,
    percent_scale: f64,
    done_statuses: HashSet<String>,
}

impl HistoryReconstructor {
    /// Create a reconstructor for the given percent field and done statuses.
    ///
    /// Percent values are read as whole percentages (scale 100).
    pub fn new<I, S>(percent_field: impl Into<String>, done_statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            percent_field: percent_field.into(),
            percent_scale: 100.0,
            done_statuses: done_statuses.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the rules from report configuration.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            config.tracker.percent_complete_field.clone(),
            config.tracker.done_statuses.iter().cloned(),
        )
        .with_percent_scale(config.tracker.percent_complete_scale)
    }

    /// Set the divisor applied to logged percent values.
    pub fn with_percent_scale(mut self, scale: f64) -> Self {
        self.percent_scale = scale;
        self
    }

    /// Field whose changes record percent complete.
    pub fn percent_field(&self) -> &str {
        &self.percent_field
    }

    /// Whether the status counts as done.
    pub fn is_done_status(&self, status: &str) -> bool {
        self.done_statuses.contains(status)
    }

    /// Normalize an item's changelog into a queryable timeline.
    ///
    /// Fails on the first timestamp that does not parse; no partial timeline
    /// is produced.
    pub fn reconstruct(&self, item: &WorkItem) -> Result<CompletionTimeline<'_>> {
        let history = WorkItemHistory::from_item(item)?;
        debug!(item = %history.key, events = history.events.len(), "Reconstructed item history");
        Ok(CompletionTimeline {
            history,
            rules: self,
        })
    }
}

/// An item's changelog, ascending by time.
#[derive(Debug, Clone)]
pub struct WorkItemHistory {
    /// Item key
    pub key: ItemKey,

    /// Parsed events; same-instant events keep their tracker order
    pub events: Vec<ChangeEvent>,
}

impl WorkItemHistory {
    /// Parse and sort an item's raw changelog.
    pub fn from_item(item: &WorkItem) -> Result<Self> {
        let mut events = item
            .changelog
            .iter()
            .map(|raw| {
                ChangeEvent::parse(raw).map_err(|source| ProgressError::TimestampParse {
                    item: item.key.clone(),
                    raw: raw.created.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // sort_by is stable
        events.sort_by(|a, b| a.occurred_at.cmp(&b.occurred_at));

        Ok(Self {
            key: item.key.clone(),
            events,
        })
    }
}

/// Completion of one item as a function of date.
#[derive(Debug, Clone)]
pub struct CompletionTimeline<'a> {
    history: WorkItemHistory,
    rules: &'a HistoryReconstructor,
}

impl CompletionTimeline<'_> {
    /// Item key.
    pub fn key(&self) -> &ItemKey {
        &self.history.key
    }

    /// Sorted events backing this timeline.
    pub fn events(&self) -> &[ChangeEvent] {
        &self.history.events
    }

    /// Completion fraction in `[0, 1]` at the end of `date`.
    ///
    /// Every event before midnight (UTC) following `date` is replayed.
    pub fn completion_at(&self, date: Date) -> Result<f64> {
        let end = end_of_day(date);
        let mut progress = 0.0_f64;
        let mut done = false;

        for event in &self.history.events {
            if matches!(end, Some(end) if event.occurred_at >= end) {
                break;
            }

            if event.field == self.rules.percent_field {
                let value = event.to_value.trim().parse::<f64>().map_err(|source| {
                    ProgressError::ValueParse {
                        item: self.history.key.clone(),
                        field: event.field.clone(),
                        raw: event.to_value.clone(),
                        source,
                    }
                })?;
                progress = progress.max(value / self.rules.percent_scale);
            } else if event.field == STATUS_FIELD && self.rules.is_done_status(&event.to_value) {
                done = true;
            }
        }

        if done {
            return Ok(1.0);
        }
        Ok(progress.clamp(0.0, 1.0))
    }

    /// Completion at each of the given dates.
    pub fn completion_series(&self, dates: &[Date]) -> Result<Vec<f64>> {
        dates.iter().map(|date| self.completion_at(*date)).collect()
    }
}

/// First instant after `date`, or `None` past the end of the calendar.
fn end_of_day(date: Date) -> Option<Time> {
    let next = date.checked_add_days(Days::new(1))?;
    let utc = FixedOffset::east_opt(0)?;
    Some(utc.from_utc_datetime(&next.and_hms_opt(0, 0, 0)?))
}
