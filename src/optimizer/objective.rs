//! Objective assembly.

use good_lp::Expression;

use crate::domain::TimeGrid;

use super::variables::VariableSet;

/// Maximize gross cumulative profit at the final timestamp.
///
/// Fee and capex accounting stays informational: the net accumulator is
/// reported but never optimized against, so sunk costs cannot distort the
/// dispatch itself.
pub fn assemble_objective(vars: &VariableSet, grid: &TimeGrid) -> Expression {
    Expression::from(vars.raw_profit[&grid.last()])
}
