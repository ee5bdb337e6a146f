//! Time-coupled constraint wiring.
//!
//! Each builder appends to a shared constraint list, iterating markets and
//! grid points in input order so two builds from identical inputs produce
//! identical constraint sets. Price and cost coverage gaps are reported here,
//! at build time, before anything reaches a solver.

use chrono::{DateTime, Utc};
use good_lp::{constraint, Constraint, Expression, Variable};
use itertools::Itertools;
use std::collections::HashMap;

use crate::domain::MarketId;

use super::error::ModelError;
use super::types::DispatchScenario;
use super::variables::VariableSet;

/// State-of-charge dynamics.
///
/// The first point is pinned to zero; every later point couples to its
/// predecessor through retention, efficiency-weighted charge inflow and
/// efficiency-penalized discharge outflow over one grid step:
/// `s[t] = γ_s·s[prev] + τ·Σ_m (γ_c·pc[m,t] − pd[m,t]/γ_d)`.
pub fn add_soc_dynamics(
    constraints: &mut Vec<Constraint>,
    vars: &VariableSet,
    scenario: &DispatchScenario,
) {
    let battery = &scenario.battery;
    let tau = scenario.grid.step_hours();
    let points = scenario.grid.points();

    let s_first = vars.soc[&points[0]];
    constraints.push(constraint!(s_first == 0.0));

    for (prev, t) in points.iter().tuple_windows() {
        let mut flow = Expression::default();
        for market in &scenario.markets {
            let pc = vars.charge[&(market.clone(), *t)];
            let pd = vars.discharge[&(market.clone(), *t)];
            flow += pc * battery.charge_efficiency;
            flow -= pd / battery.discharge_efficiency;
        }
        let s_t = vars.soc[t];
        let rhs = vars.soc[prev] * battery.retention + flow * tau;
        constraints.push(constraint!(s_t == rhs));
    }
}

/// Aggregate power-rate limits.
///
/// The limit applies to the sum of dispatch across markets, so lower and
/// upper bounds are separate constraints on the aggregate rather than
/// per-variable bounds. Both aggregates are pinned to zero at the first
/// point: no dispatch before the horizon begins.
pub fn add_rate_limits(
    constraints: &mut Vec<Constraint>,
    vars: &VariableSet,
    scenario: &DispatchScenario,
) {
    let battery = &scenario.battery;
    let points = scenario.grid.points();

    let charge_first = aggregate(&vars.charge, &scenario.markets, points[0]);
    let discharge_first = aggregate(&vars.discharge, &scenario.markets, points[0]);
    constraints.push(constraint!(charge_first == 0.0));
    constraints.push(constraint!(discharge_first == 0.0));

    for &t in &points[1..] {
        let charge = aggregate(&vars.charge, &scenario.markets, t);
        constraints.push(constraint!(charge.clone() >= 0.0));
        constraints.push(constraint!(charge <= battery.max_charge_kw));

        let discharge = aggregate(&vars.discharge, &scenario.markets, t);
        constraints.push(constraint!(discharge.clone() >= 0.0));
        constraints.push(constraint!(discharge <= battery.max_discharge_kw));
    }
}

/// Cycle-lifetime budget.
///
/// One equivalent full cycle is an amount of discharged energy equal to the
/// full usable capacity, accumulated additively across partial excursions:
/// `z = S_max·Σ_{m,t} pd[m,t]`, `z ≤ lifetime_cycles`. A linear proxy, not a
/// cycle-detection algorithm; partial cycles are approximated additively.
pub fn add_cycle_budget(
    constraints: &mut Vec<Constraint>,
    vars: &VariableSet,
    scenario: &DispatchScenario,
    cycles: Variable,
    lifetime_cycles: f64,
) {
    let mut total_discharge = Expression::default();
    for market in &scenario.markets {
        for &t in scenario.grid.points() {
            total_discharge += vars.discharge[&(market.clone(), t)];
        }
    }
    let rhs = total_discharge * scenario.battery.soc_max_kwh;
    constraints.push(constraint!(cycles == rhs));
    constraints.push(constraint!(cycles <= lifetime_cycles));
}

/// Profit-accrual recurrences.
///
/// The gross accumulator is always wired fee-free. The net accumulator
/// repeats the same recurrence and, when fees are considered, subtracts the
/// operational cost each period and the capex total (summed over the whole
/// horizon) at the first point.
pub fn add_profit_accrual(
    constraints: &mut Vec<Constraint>,
    vars: &VariableSet,
    scenario: &DispatchScenario,
    consider_fees: bool,
) -> Result<(), ModelError> {
    let points = scenario.grid.points();
    let first = points[0];

    let step_first = market_revenue(vars, scenario, first)?;
    let raw_first = vars.raw_profit[&first];
    constraints.push(constraint!(raw_first == step_first.clone()));

    let profit_first = vars.profit[&first];
    if consider_fees {
        let opex = operational_cost(scenario, first)?;
        let capex = total_capex(scenario)?;
        let rhs = step_first - opex - capex;
        constraints.push(constraint!(profit_first == rhs));
    } else {
        constraints.push(constraint!(profit_first == step_first));
    }

    for (prev, t) in points.iter().tuple_windows() {
        let step = market_revenue(vars, scenario, *t)?;

        let raw_t = vars.raw_profit[t];
        let raw_rhs = vars.raw_profit[prev] + step.clone();
        constraints.push(constraint!(raw_t == raw_rhs));

        let profit_t = vars.profit[t];
        if consider_fees {
            let opex = operational_cost(scenario, *t)?;
            let rhs = vars.profit[prev] + step - opex;
            constraints.push(constraint!(profit_t == rhs));
        } else {
            let rhs = vars.profit[prev] + step;
            constraints.push(constraint!(profit_t == rhs));
        }
    }
    Ok(())
}

/// `Σ_m price[m,t]·(pd[m,t] − pc[m,t])` for one period.
fn market_revenue(
    vars: &VariableSet,
    scenario: &DispatchScenario,
    t: DateTime<Utc>,
) -> Result<Expression, ModelError> {
    let mut revenue = Expression::default();
    for market in &scenario.markets {
        let price = scenario
            .prices
            .get(market, t)
            .ok_or_else(|| ModelError::MissingPrice {
                market: market.clone(),
                at: t,
            })?;
        let pc = vars.charge[&(market.clone(), t)];
        let pd = vars.discharge[&(market.clone(), t)];
        revenue += (pd - pc) * price;
    }
    Ok(revenue)
}

fn operational_cost(scenario: &DispatchScenario, t: DateTime<Utc>) -> Result<f64, ModelError> {
    scenario
        .costs
        .operational_at(t)
        .ok_or(ModelError::MissingOperationalCost(t))
}

/// Capex summed over the whole horizon; charged entirely at the first point.
fn total_capex(scenario: &DispatchScenario) -> Result<f64, ModelError> {
    scenario
        .grid
        .points()
        .iter()
        .map(|&t| {
            scenario
                .costs
                .capex_at(t)
                .ok_or(ModelError::MissingCapex(t))
        })
        .sum()
}

fn aggregate(
    vars: &HashMap<(MarketId, DateTime<Utc>), Variable>,
    markets: &[MarketId],
    t: DateTime<Utc>,
) -> Expression {
    let mut sum = Expression::default();
    for market in markets {
        sum += vars[&(market.clone(), t)];
    }
    sum
}
