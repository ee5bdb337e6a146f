//! Model assembly.
//!
//! Composes the variable registry, the constraint builders and the objective
//! into one solvable model per configuration. Every build call produces an
//! independent model instance with its own variable handles; nothing is
//! shared or mutated across builds.

use chrono::{DateTime, Utc};
use good_lp::{Constraint, Expression, ProblemVariables, SolverModel, Variable};
use tracing::{debug, info};

use crate::config::DispatchConfig;
use crate::domain::{MarketId, TimeGrid};
use crate::solver::SolverBackend;

use super::constraints::{
    add_cycle_budget, add_profit_accrual, add_rate_limits, add_soc_dynamics,
};
use super::error::ModelError;
use super::objective::assemble_objective;
use super::solution::DispatchSolution;
use super::types::DispatchScenario;
use super::variables::VariableSet;

/// Assembled, unsolved dispatch LP bound to a solver backend.
pub struct DispatchModel {
    problem: ProblemVariables,
    vars: VariableSet,
    constraints: Vec<Constraint>,
    objective: Expression,
    backend: SolverBackend,
    markets: Vec<MarketId>,
    grid: TimeGrid,
}

impl DispatchModel {
    /// Validates the scenario and wires variables, constraints and objective.
    ///
    /// Fails eagerly on any input-shape problem; no partial model is
    /// returned.
    pub fn build(
        scenario: &DispatchScenario,
        config: &DispatchConfig,
    ) -> Result<Self, ModelError> {
        scenario.validate()?;

        let mut problem = ProblemVariables::new();
        let vars = VariableSet::declare(&mut problem, scenario, config);

        let mut constraints = Vec::new();
        add_soc_dynamics(&mut constraints, &vars, scenario);
        add_rate_limits(&mut constraints, &vars, scenario);
        if let Some(cycles) = vars.cycles {
            add_cycle_budget(
                &mut constraints,
                &vars,
                scenario,
                cycles,
                config.lifetime_cycles,
            );
        }
        add_profit_accrual(&mut constraints, &vars, scenario, config.consider_fees)?;

        let objective = assemble_objective(&vars, &scenario.grid);

        info!(
            periods = scenario.grid.len(),
            markets = scenario.markets.len(),
            constraints = constraints.len(),
            consider_lifetime = config.consider_lifetime,
            consider_fees = config.consider_fees,
            "assembled dispatch model"
        );

        Ok(Self {
            problem,
            vars,
            constraints,
            objective,
            backend: config.solver,
            markets: scenario.markets.clone(),
            grid: scenario.grid.clone(),
        })
    }

    pub fn variables(&self) -> &VariableSet {
        &self.vars
    }

    pub fn charge_var(&self, market: &MarketId, t: DateTime<Utc>) -> Option<Variable> {
        self.vars.charge.get(&(market.clone(), t)).copied()
    }

    pub fn discharge_var(&self, market: &MarketId, t: DateTime<Utc>) -> Option<Variable> {
        self.vars.discharge.get(&(market.clone(), t)).copied()
    }

    pub fn soc_var(&self, t: DateTime<Utc>) -> Option<Variable> {
        self.vars.soc.get(&t).copied()
    }

    pub fn cycle_var(&self) -> Option<Variable> {
        self.vars.cycles
    }

    pub fn profit_var(&self, t: DateTime<Utc>) -> Option<Variable> {
        self.vars.profit.get(&t).copied()
    }

    pub fn raw_profit_var(&self, t: DateTime<Utc>) -> Option<Variable> {
        self.vars.raw_profit.get(&t).copied()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn backend(&self) -> SolverBackend {
        self.backend
    }

    /// Hands the model to the configured backend and extracts the solved
    /// values. Infeasible or unbounded outcomes propagate unchanged.
    pub fn solve(self) -> Result<DispatchSolution, ModelError> {
        let Self {
            problem,
            vars,
            constraints,
            objective,
            backend,
            markets,
            grid,
        } = self;
        debug!(%backend, constraints = constraints.len(), "handing model to solver");

        match backend {
            SolverBackend::Minilp => {
                let mut model = problem
                    .maximise(objective)
                    .using(good_lp::solvers::minilp::minilp);
                for constraint in constraints {
                    model = model.with(constraint);
                }
                let solved = model.solve()?;
                Ok(DispatchSolution::extract(&solved, &vars, &markets, &grid))
            }
            #[cfg(feature = "cbc")]
            SolverBackend::Cbc => {
                let mut model = problem
                    .maximise(objective)
                    .using(good_lp::solvers::coin_cbc::coin_cbc);
                for constraint in constraints {
                    model = model.with(constraint);
                }
                let solved = model.solve()?;
                Ok(DispatchSolution::extract(&solved, &vars, &markets, &grid))
            }
            #[cfg(feature = "highs")]
            SolverBackend::Highs => {
                let mut model = problem
                    .maximise(objective)
                    .using(good_lp::solvers::highs::highs);
                for constraint in constraints {
                    model = model.with(constraint);
                }
                let solved = model.solve()?;
                Ok(DispatchSolution::extract(&solved, &vars, &markets, &grid))
            }
        }
    }
}
