use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;

use crate::optimizer::ModelError;

/// Discretized optimization horizon.
///
/// At least two points, strictly increasing, with a single uniform step. The
/// state-of-charge and profit recurrences assume one step size for the whole
/// horizon, so uniformity is checked here instead of being derived from the
/// first pair and silently trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    points: Vec<DateTime<Utc>>,
    step: Duration,
}

impl TimeGrid {
    pub fn new(points: Vec<DateTime<Utc>>) -> Result<Self, ModelError> {
        if points.len() < 2 {
            return Err(ModelError::GridTooShort(points.len()));
        }
        let step = points[1] - points[0];
        for (prev, next) in points.iter().tuple_windows() {
            let diff = *next - *prev;
            if diff <= Duration::zero() {
                return Err(ModelError::NonMonotonicGrid(*next));
            }
            if diff != step {
                return Err(ModelError::DegenerateGrid {
                    at: *next,
                    expected_seconds: step.num_seconds(),
                    found_seconds: diff.num_seconds(),
                });
            }
        }
        Ok(Self { points, step })
    }

    pub fn points(&self) -> &[DateTime<Utc>] {
        &self.points
    }

    pub fn first(&self) -> DateTime<Utc> {
        self.points[0]
    }

    pub fn last(&self) -> DateTime<Utc> {
        self.points[self.points.len() - 1]
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Time resolution in hours (τ in the recurrence relations).
    pub fn step_hours(&self) -> f64 {
        self.step.num_seconds() as f64 / 3600.0
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
