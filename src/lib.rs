//! LP model formulation for multi-market battery storage dispatch.
//!
//! The crate turns a dispatch scenario (time grid, markets, prices, battery
//! parameters, cost schedules) into a solvable linear program: charge and
//! discharge power per market and period, state-of-charge dynamics, aggregate
//! rate limits, an optional cycle-lifetime budget and running profit
//! accumulators, maximizing gross profit at the end of the horizon. Solving
//! is delegated to a `good_lp` backend; solved values are read back by the
//! same (market, timestamp) keys used to declare the variables.

pub mod config;
pub mod domain;
pub mod optimizer;
pub mod solver;
pub mod telemetry;

pub use config::{Config, DispatchConfig};
pub use optimizer::{DispatchModel, DispatchScenario, DispatchSolution, ModelError};
pub use solver::SolverBackend;
