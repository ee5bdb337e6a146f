use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One cost allocation, the row format consumed from cost schedule files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostPoint {
    pub time: DateTime<Utc>,
    pub amount: f64,
}

/// Per-period operating cost and capital expenditure allocations.
///
/// Both mappings are supplied by the caller, pre-allocated across the
/// horizon. They are only consumed when fee consideration is enabled; an
/// empty schedule is fine otherwise.
#[derive(Debug, Clone, Default)]
pub struct CostSchedule {
    operational: HashMap<DateTime<Utc>, f64>,
    capex: HashMap<DateTime<Utc>, f64>,
}

impl CostSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(
        operational: impl IntoIterator<Item = CostPoint>,
        capex: impl IntoIterator<Item = CostPoint>,
    ) -> Self {
        let mut schedule = Self::new();
        for point in operational {
            schedule.insert_operational(point.time, point.amount);
        }
        for point in capex {
            schedule.insert_capex(point.time, point.amount);
        }
        schedule
    }

    pub fn insert_operational(&mut self, time: DateTime<Utc>, amount: f64) {
        self.operational.insert(time, amount);
    }

    pub fn insert_capex(&mut self, time: DateTime<Utc>, amount: f64) {
        self.capex.insert(time, amount);
    }

    pub fn operational_at(&self, time: DateTime<Utc>) -> Option<f64> {
        self.operational.get(&time).copied()
    }

    pub fn capex_at(&self, time: DateTime<Utc>) -> Option<f64> {
        self.capex.get(&time).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        "2026-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_lookups() {
        let schedule = CostSchedule::from_points(
            [CostPoint { time: t0(), amount: 1.5 }],
            [CostPoint { time: t0() + Duration::hours(1), amount: 100.0 }],
        );
        assert_eq!(schedule.operational_at(t0()), Some(1.5));
        assert_eq!(schedule.operational_at(t0() + Duration::hours(1)), None);
        assert_eq!(schedule.capex_at(t0() + Duration::hours(1)), Some(100.0));
        assert_eq!(schedule.capex_at(t0()), None);
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = CostSchedule::new();
        assert_eq!(schedule.operational_at(t0()), None);
        assert_eq!(schedule.capex_at(t0()), None);
    }
}
