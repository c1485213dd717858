//! Projection engine - earned value, velocity and completion forecasts.
//!
//! Rows are produced strictly in checkpoint order: each row's velocity and
//! window statistics depend on the rows before it.
//!
//! Availability by row index `i`:
//! - `velocity` from `i >= 1`
//! - `moving_avg_velocity` from `i >= 2`
//! - `std_dev_velocity`, the one-sigma velocity band and the projected
//!   dates from `i >= 3`
//!
//! The averaging window is `min(i, W)` velocities, so early rows use a
//! shorter window instead of staying empty until `W` weeks have passed.

use burndown_core::Date;
use serde::Serialize;
use tracing::debug;

use crate::calendar::add_business_days;
use crate::error::{ProgressError, Result};
use crate::matrix::CompletionMatrix;
use crate::stats::{mean, sample_std_dev, trailing_window};

/// Working days in a week; converts weekly velocity into a day budget.
pub const WORKING_DAYS_PER_WEEK: f64 = 5.0;

/// One weekly row of the projection table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    /// Checkpoint date
    pub date: Date,

    /// Earned value at the checkpoint
    pub completed_value: f64,

    /// Total size minus earned value
    pub remaining_value: f64,

    /// Change in earned value since the previous checkpoint
    pub velocity: Option<f64>,

    /// Mean velocity over the trailing window
    pub moving_avg_velocity: Option<f64>,

    /// Sample standard deviation over the same window
    pub std_dev_velocity: Option<f64>,

    /// Projection at the fast velocity
    pub fast_date: Option<Date>,

    /// Projection at the mean velocity
    pub mean_date: Option<Date>,

    /// Projection at the slow velocity
    pub slow_date: Option<Date>,

    /// Mean plus one standard deviation (p68 optimistic)
    pub fast_velocity: Option<f64>,

    /// Mean minus one standard deviation (p68 pessimistic)
    pub slow_velocity: Option<f64>,
}

/// Outcome of projecting a completion date from one velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectedDate {
    /// Work completes on this date
    On(Date),

    /// Velocity is zero or negative, no date can be projected
    RemainingButNoVelocity,

    /// The projection falls outside the representable calendar
    OutOfRange,
}

impl ProjectedDate {
    /// Project when `remaining` is worked off at `weekly_velocity`.
    pub fn project(from: Date, remaining: f64, weekly_velocity: f64) -> Self {
        if !(weekly_velocity.is_finite() && weekly_velocity > 0.0) {
            return Self::RemainingButNoVelocity;
        }

        let days = (remaining / weekly_velocity * WORKING_DAYS_PER_WEEK).ceil().max(0.0);
        if !days.is_finite() || days > u32::MAX as f64 {
            return Self::OutOfRange;
        }

        match add_business_days(from, days as u64) {
            Some(date) => Self::On(date),
            None => Self::OutOfRange,
        }
    }

    /// The projected date, if any.
    pub fn date(self) -> Option<Date> {
        match self {
            Self::On(date) => Some(date),
            Self::RemainingButNoVelocity | Self::OutOfRange => None,
        }
    }
}

/// Turns weekly earned-value samples into projection rows.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionEngine {
    window: usize,
}

impl ProjectionEngine {
    /// Create an engine with a moving average window of `window` weeks.
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ProgressError::InvalidWindow(window));
        }
        Ok(Self { window })
    }

    /// Moving average window in weeks.
    pub fn window(&self) -> usize {
        self.window
    }

    /// One row per checkpoint of the matrix.
    pub fn project(&self, matrix: &CompletionMatrix) -> Vec<ProjectionRow> {
        self.project_series(matrix.checkpoints(), &matrix.completed_values(), matrix.total_size())
    }

    /// One row per checkpoint, given earned value at each checkpoint.
    ///
    /// `completed` must have one entry per checkpoint; extra entries on
    /// either side are ignored.
    pub fn project_series(
        &self,
        checkpoints: &[Date],
        completed: &[f64],
        total_size: f64,
    ) -> Vec<ProjectionRow> {
        let weeks = checkpoints.len().min(completed.len());
        let mut rows = Vec::with_capacity(weeks);
        // velocities[k] is the velocity of row k + 1
        let mut velocities: Vec<f64> = Vec::with_capacity(weeks);

        for i in 0..weeks {
            let date = checkpoints[i];
            let completed_value = completed[i];
            let remaining_value = total_size - completed_value;

            let velocity = if i >= 1 {
                let velocity = completed_value - completed[i - 1];
                velocities.push(velocity);
                Some(velocity)
            } else {
                None
            };

            let window = trailing_window(&velocities, velocities.len().saturating_sub(1), self.window);

            let moving_avg_velocity = if i >= 2 { mean(window) } else { None };
            let std_dev_velocity = if i >= 3 { sample_std_dev(window) } else { None };
            let fast_velocity = moving_avg_velocity.zip(std_dev_velocity).map(|(m, s)| m + s);
            let slow_velocity = moving_avg_velocity.zip(std_dev_velocity).map(|(m, s)| m - s);

            let (fast_date, mean_date, slow_date) = if i >= 3 {
                (
                    self.forecast(date, remaining_value, fast_velocity, "fast"),
                    self.forecast(date, remaining_value, moving_avg_velocity, "mean"),
                    self.forecast(date, remaining_value, slow_velocity, "slow"),
                )
            } else {
                (None, None, None)
            };

            rows.push(ProjectionRow {
                date,
                completed_value,
                remaining_value,
                velocity,
                moving_avg_velocity,
                std_dev_velocity,
                fast_date,
                mean_date,
                slow_date,
                fast_velocity,
                slow_velocity,
            });
        }

        rows
    }

    fn forecast(&self, from: Date, remaining: f64, velocity: Option<f64>, band: &str) -> Option<Date> {
        let velocity = velocity?;
        let projected = ProjectedDate::project(from, remaining, velocity);
        if projected.date().is_none() {
            debug!(checkpoint = %from, band, velocity, outcome = ?projected, "No projected date");
        }
        projected.date()
    }
}
