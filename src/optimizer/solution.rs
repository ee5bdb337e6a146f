use chrono::{DateTime, Utc};
use good_lp::Solution;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::{DispatchEntry, DispatchSchedule, MarketId, TimeGrid};

use super::variables::VariableSet;

/// Power below this is reported as idle in the schedule (kW).
const IDLE_THRESHOLD_KW: f64 = 1e-3;

/// Solved variable values, retrievable by the same keys used to declare them.
#[derive(Debug, Clone)]
pub struct DispatchSolution {
    charge: HashMap<(MarketId, DateTime<Utc>), f64>,
    discharge: HashMap<(MarketId, DateTime<Utc>), f64>,
    soc: HashMap<DateTime<Utc>, f64>,
    cycles: Option<f64>,
    profit: HashMap<DateTime<Utc>, f64>,
    raw_profit: HashMap<DateTime<Utc>, f64>,
    markets: Vec<MarketId>,
    grid: TimeGrid,
}

impl DispatchSolution {
    pub(crate) fn extract(
        solution: &impl Solution,
        vars: &VariableSet,
        markets: &[MarketId],
        grid: &TimeGrid,
    ) -> Self {
        let mut charge = HashMap::new();
        let mut discharge = HashMap::new();
        for market in markets {
            for &t in grid.points() {
                let key = (market.clone(), t);
                charge.insert(key.clone(), solution.value(vars.charge[&key]));
                discharge.insert(key.clone(), solution.value(vars.discharge[&key]));
            }
        }
        let soc = grid
            .points()
            .iter()
            .map(|&t| (t, solution.value(vars.soc[&t])))
            .collect();
        let profit = grid
            .points()
            .iter()
            .map(|&t| (t, solution.value(vars.profit[&t])))
            .collect();
        let raw_profit = grid
            .points()
            .iter()
            .map(|&t| (t, solution.value(vars.raw_profit[&t])))
            .collect();
        Self {
            charge,
            discharge,
            soc,
            cycles: vars.cycles.map(|z| solution.value(z)),
            profit,
            raw_profit,
            markets: markets.to_vec(),
            grid: grid.clone(),
        }
    }

    pub fn charge(&self, market: &MarketId, t: DateTime<Utc>) -> Option<f64> {
        self.charge.get(&(market.clone(), t)).copied()
    }

    pub fn discharge(&self, market: &MarketId, t: DateTime<Utc>) -> Option<f64> {
        self.discharge.get(&(market.clone(), t)).copied()
    }

    pub fn soc(&self, t: DateTime<Utc>) -> Option<f64> {
        self.soc.get(&t).copied()
    }

    pub fn cycles(&self) -> Option<f64> {
        self.cycles
    }

    pub fn profit(&self, t: DateTime<Utc>) -> Option<f64> {
        self.profit.get(&t).copied()
    }

    pub fn raw_profit(&self, t: DateTime<Utc>) -> Option<f64> {
        self.raw_profit.get(&t).copied()
    }

    /// Total charge power across markets in one period (kW).
    pub fn aggregate_charge(&self, t: DateTime<Utc>) -> f64 {
        self.markets
            .iter()
            .filter_map(|m| self.charge(m, t))
            .sum()
    }

    /// Total discharge power across markets in one period (kW).
    pub fn aggregate_discharge(&self, t: DateTime<Utc>) -> f64 {
        self.markets
            .iter()
            .filter_map(|m| self.discharge(m, t))
            .sum()
    }

    /// Gross cumulative profit at the end of the horizon (the objective).
    pub fn gross_profit(&self) -> f64 {
        self.raw_profit[&self.grid.last()]
    }

    /// Net cumulative profit at the end of the horizon.
    pub fn net_profit(&self) -> f64 {
        self.profit[&self.grid.last()]
    }

    pub fn markets(&self) -> &[MarketId] {
        &self.markets
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Renders the solved values as a dispatch schedule for reporting.
    pub fn into_schedule(self) -> DispatchSchedule {
        let step = self.grid.step();
        let mut entries = Vec::with_capacity(self.grid.len() * self.markets.len());
        for &t in self.grid.points() {
            for market in &self.markets {
                let key = (market.clone(), t);
                let target_power_kw = self.charge[&key] - self.discharge[&key];
                let reason = if target_power_kw > IDLE_THRESHOLD_KW {
                    "lp:charge"
                } else if target_power_kw < -IDLE_THRESHOLD_KW {
                    "lp:discharge"
                } else {
                    "lp:idle"
                };
                entries.push(DispatchEntry {
                    time_start: t,
                    time_end: t + step,
                    market: market.clone(),
                    target_power_kw,
                    reason: reason.to_string(),
                });
            }
        }
        DispatchSchedule {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            valid_from: self.grid.first(),
            valid_until: self.grid.last() + step,
            entries,
            gross_profit: self.gross_profit(),
            net_profit: self.net_profit(),
            cycles: self.cycles,
            optimizer_version: "lp-v1.0".to_string(),
        }
    }
}
