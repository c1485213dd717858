//! Completion matrix - item x week completion fractions and sizes.

use burndown_core::{Date, ItemKey, WorkItem};
use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::history::HistoryReconstructor;

/// One item's row of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    /// Item key
    pub key: ItemKey,

    /// Summary snapshot
    pub summary: String,

    /// Issue type snapshot
    pub issue_type: String,

    /// Status snapshot
    pub status: String,

    /// Assignee snapshot
    pub assignee: String,

    /// Item size
    pub size: f64,

    /// Completion fraction at each checkpoint, oldest first
    pub completion: Vec<f64>,
}

impl MatrixRow {
    /// Earned value (completion x size) at a checkpoint index.
    pub fn earned_value(&self, week: usize) -> Option<f64> {
        self.completion.get(week).map(|fraction| fraction * self.size)
    }
}

/// Completion of every item at every weekly checkpoint.
///
/// Built once per report run and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionMatrix {
    checkpoints: Vec<Date>,
    rows: Vec<MatrixRow>,
}

impl CompletionMatrix {
    /// Reconstruct every item once and sample it at each checkpoint.
    pub fn build(
        items: &[WorkItem],
        reconstructor: &HistoryReconstructor,
        checkpoints: Vec<Date>,
    ) -> Result<Self> {
        let mut rows = Vec::with_capacity(items.len());

        for item in items {
            if item.size == 0.0 {
                warn!(item = %item.key, "Item has no size and earns no value");
            }
            let timeline = reconstructor.reconstruct(item)?;
            let completion = timeline.completion_series(&checkpoints)?;

            rows.push(MatrixRow {
                key: item.key.clone(),
                summary: item.summary.clone(),
                issue_type: item.issue_type.clone(),
                status: item.status.clone(),
                assignee: item.assignee.clone(),
                size: item.size,
                completion,
            });
        }

        Ok(Self { checkpoints, rows })
    }

    /// Assemble a matrix from precomputed rows.
    ///
    /// Rows shorter than the checkpoint list read as 0 for missing weeks.
    pub fn from_rows(checkpoints: Vec<Date>, rows: Vec<MatrixRow>) -> Self {
        Self { checkpoints, rows }
    }

    /// Checkpoint dates, oldest first.
    pub fn checkpoints(&self) -> &[Date] {
        &self.checkpoints
    }

    /// Item rows in input order.
    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    /// `(fraction, size)` for an item at a checkpoint index.
    pub fn get(&self, key: &ItemKey, week: usize) -> Option<(f64, f64)> {
        let row = self.rows.iter().find(|row| &row.key == key)?;
        row.completion.get(week).map(|fraction| (*fraction, row.size))
    }

    /// Sum of all item sizes.
    pub fn total_size(&self) -> f64 {
        self.rows.iter().map(|row| row.size).sum()
    }

    /// Earned value summed across items at a checkpoint index.
    pub fn completed_value(&self, week: usize) -> f64 {
        self.rows
            .iter()
            .filter_map(|row| row.earned_value(week))
            .sum()
    }

    /// Earned value at every checkpoint, oldest first.
    pub fn completed_values(&self) -> Vec<f64> {
        (0..self.checkpoints.len())
            .map(|week| self.completed_value(week))
            .collect()
    }
}
