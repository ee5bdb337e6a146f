//! Decision-variable registry.
//!
//! Every variable is declared here, with its index domain and static bounds,
//! before any constraint references it. The declared handles travel between
//! builder steps inside [`VariableSet`] instead of being looked up by name in
//! some shared namespace.

use chrono::{DateTime, Utc};
use good_lp::{variable, ProblemVariables, Variable};
use std::collections::HashMap;

use crate::config::DispatchConfig;
use crate::domain::{BatteryParams, MarketId, TimeGrid};

use super::types::DispatchScenario;

/// Handles to every decision variable of one model instance.
#[derive(Debug, Clone)]
pub struct VariableSet {
    /// Charge power per (market, timestamp), kW.
    pub charge: HashMap<(MarketId, DateTime<Utc>), Variable>,
    /// Discharge power per (market, timestamp), kW.
    pub discharge: HashMap<(MarketId, DateTime<Utc>), Variable>,
    /// State of charge per timestamp, kWh.
    pub soc: HashMap<DateTime<Utc>, Variable>,
    /// Cumulative equivalent full cycles; present only with lifetime accounting.
    pub cycles: Option<Variable>,
    /// Running net profit per timestamp (fee deductions applied when enabled).
    pub profit: HashMap<DateTime<Utc>, Variable>,
    /// Running gross profit per timestamp, always fee-free.
    pub raw_profit: HashMap<DateTime<Utc>, Variable>,
}

impl VariableSet {
    /// Declares all variables for the scenario under the given configuration.
    pub fn declare(
        problem: &mut ProblemVariables,
        scenario: &DispatchScenario,
        config: &DispatchConfig,
    ) -> Self {
        let (charge, discharge) =
            declare_power_variables(problem, &scenario.markets, &scenario.grid);
        let soc = declare_soc_variable(problem, &scenario.grid, &scenario.battery);
        let cycles = config
            .consider_lifetime
            .then(|| declare_cycle_variable(problem));
        let (profit, raw_profit) = declare_profit_variables(problem, &scenario.grid);
        Self {
            charge,
            discharge,
            soc,
            cycles,
            profit,
            raw_profit,
        }
    }
}

/// Charge and discharge power, indexed by (market, timestamp).
///
/// Bounded `[0, +inf)` only: the rate limit applies to the sum across
/// markets, so it is enforced by constraints rather than variable bounds.
pub fn declare_power_variables(
    problem: &mut ProblemVariables,
    markets: &[MarketId],
    grid: &TimeGrid,
) -> (
    HashMap<(MarketId, DateTime<Utc>), Variable>,
    HashMap<(MarketId, DateTime<Utc>), Variable>,
) {
    let mut charge = HashMap::new();
    let mut discharge = HashMap::new();
    for market in markets {
        for &t in grid.points() {
            charge.insert((market.clone(), t), problem.add(variable().min(0.0)));
            discharge.insert((market.clone(), t), problem.add(variable().min(0.0)));
        }
    }
    (charge, discharge)
}

/// State of charge per timestamp, bounded to the battery's usable window.
pub fn declare_soc_variable(
    problem: &mut ProblemVariables,
    grid: &TimeGrid,
    battery: &BatteryParams,
) -> HashMap<DateTime<Utc>, Variable> {
    grid.points()
        .iter()
        .map(|&t| {
            (
                t,
                problem.add(variable().min(battery.soc_min_kwh).max(battery.soc_max_kwh)),
            )
        })
        .collect()
}

/// Single cumulative cycle-count variable, non-negative.
pub fn declare_cycle_variable(problem: &mut ProblemVariables) -> Variable {
    problem.add(variable().min(0.0))
}

/// Net and gross running-profit accumulators per timestamp, unbounded
/// (profit may go negative).
pub fn declare_profit_variables(
    problem: &mut ProblemVariables,
    grid: &TimeGrid,
) -> (
    HashMap<DateTime<Utc>, Variable>,
    HashMap<DateTime<Utc>, Variable>,
) {
    let profit = grid
        .points()
        .iter()
        .map(|&t| (t, problem.add(variable())))
        .collect();
    let raw_profit = grid
        .points()
        .iter()
        .map(|&t| (t, problem.add(variable())))
        .collect();
    (profit, raw_profit)
}
