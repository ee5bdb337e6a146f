use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::market::MarketId;

/// Solved dispatch plan, the reporting-side view of a model solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSchedule {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub entries: Vec<DispatchEntry>,
    /// Cumulative market revenue at the end of the horizon, fees excluded.
    pub gross_profit: f64,
    /// Gross profit minus operating cost and capital expenditure.
    pub net_profit: f64,
    /// Equivalent-full-cycle tally, present when lifetime accounting is on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycles: Option<f64>,
    pub optimizer_version: String,
}

/// One (market, period) dispatch instruction.
///
/// Positive `target_power_kw` charges the battery, negative discharges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchEntry {
    pub time_start: DateTime<Utc>,
    pub time_end: DateTime<Utc>,
    pub market: MarketId,
    pub target_power_kw: f64,
    pub reason: String,
}

impl DispatchSchedule {
    pub fn power_at(&self, market: &MarketId, t: DateTime<Utc>) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.market == *market && t >= e.time_start && t < e.time_end)
            .map(|e| e.target_power_kw)
    }

    pub fn entries_for(&self, market: &MarketId) -> impl Iterator<Item = &DispatchEntry> + '_ {
        let market = market.clone();
        self.entries.iter().filter(move |e| e.market == market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        "2026-01-01T00:00:00Z".parse().unwrap()
    }

    fn entry(market: &str, start: DateTime<Utc>, power: f64) -> DispatchEntry {
        DispatchEntry {
            time_start: start,
            time_end: start + Duration::hours(1),
            market: MarketId::from(market),
            target_power_kw: power,
            reason: "lp:charge".to_string(),
        }
    }

    #[test]
    fn test_power_at_window_lookup() {
        let schedule = DispatchSchedule {
            id: Uuid::new_v4(),
            created_at: t0(),
            valid_from: t0(),
            valid_until: t0() + Duration::hours(2),
            entries: vec![
                entry("day-ahead", t0(), 3.0),
                entry("day-ahead", t0() + Duration::hours(1), -2.0),
                entry("fcr", t0(), 1.0),
            ],
            gross_profit: 0.0,
            net_profit: 0.0,
            cycles: None,
            optimizer_version: "lp-v1.0".to_string(),
        };

        let market = MarketId::from("day-ahead");
        assert_eq!(schedule.power_at(&market, t0()), Some(3.0));
        assert_eq!(
            schedule.power_at(&market, t0() + Duration::minutes(30)),
            Some(3.0)
        );
        assert_eq!(
            schedule.power_at(&market, t0() + Duration::hours(1)),
            Some(-2.0)
        );
        assert_eq!(schedule.power_at(&market, t0() + Duration::hours(2)), None);
        assert_eq!(schedule.entries_for(&market).count(), 2);
    }
}
