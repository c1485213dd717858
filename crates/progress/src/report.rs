//! Report assembly - the full pipeline from work items to projection rows.

use burndown_core::{Date, ReportConfig, WorkItem};
use serde::Serialize;
use tracing::{info, warn};

use crate::checkpoint::week_checkpoints;
use crate::error::Result;
use crate::history::HistoryReconstructor;
use crate::matrix::CompletionMatrix;
use crate::projection::{ProjectionEngine, ProjectionRow};

/// Everything the renderer needs; all values are final.
#[derive(Debug, Clone, Serialize)]
pub struct BurndownReport {
    /// First checkpoint
    pub start_date: Date,

    /// Date the report was computed as of
    pub as_of: Date,

    /// Moving average window in weeks
    pub window: usize,

    /// Item x week completion
    pub matrix: CompletionMatrix,

    /// One row per checkpoint, oldest first
    pub rows: Vec<ProjectionRow>,
}

impl BurndownReport {
    /// Checkpoint dates, oldest first.
    pub fn checkpoints(&self) -> &[Date] {
        self.matrix.checkpoints()
    }

    /// The most recent projection row.
    pub fn latest(&self) -> Option<&ProjectionRow> {
        self.rows.last()
    }
}

/// Builds a [`BurndownReport`] from tracker items.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    reconstructor: HistoryReconstructor,
    engine: ProjectionEngine,
    start_date: Date,
}

impl ReportBuilder {
    /// Create a builder from its parts.
    pub fn new(reconstructor: HistoryReconstructor, engine: ProjectionEngine, start_date: Date) -> Self {
        Self {
            reconstructor,
            engine,
            start_date,
        }
    }

    /// Create a builder from validated configuration.
    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        let start_date = config.start_date()?;
        let engine = ProjectionEngine::new(config.moving_avg_weeks as usize)?;
        Ok(Self::new(HistoryReconstructor::from_config(config), engine, start_date))
    }

    /// Reconstruct, sample and project every item as of `as_of`.
    pub fn build(&self, items: &[WorkItem], as_of: Date) -> Result<BurndownReport> {
        let checkpoints = week_checkpoints(self.start_date, as_of);
        if checkpoints.is_empty() {
            warn!(start = %self.start_date, %as_of, "Start date is after the as-of date, no checkpoints");
        }

        let matrix = CompletionMatrix::build(items, &self.reconstructor, checkpoints)?;
        let rows = self.engine.project(&matrix);

        info!(
            items = matrix.rows().len(),
            weeks = matrix.checkpoints().len(),
            total_size = matrix.total_size(),
            "Built burndown report"
        );

        Ok(BurndownReport {
            start_date: self.start_date,
            as_of,
            window: self.engine.window(),
            matrix,
            rows,
        })
    }
}
