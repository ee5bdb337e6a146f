use chrono::{DateTime, Utc};
use good_lp::ResolutionError;
use thiserror::Error;

use crate::domain::MarketId;

/// Errors surfaced while assembling or solving a dispatch model.
///
/// Input-shape problems are detected eagerly at build time and no partial
/// model is returned; solver outcomes are passed through unchanged.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("time grid must contain at least two points, got {0}")]
    GridTooShort(usize),

    #[error("time grid is not strictly increasing at {0}")]
    NonMonotonicGrid(DateTime<Utc>),

    #[error(
        "non-uniform time grid at {at}: step of {found_seconds}s, expected {expected_seconds}s"
    )]
    DegenerateGrid {
        at: DateTime<Utc>,
        expected_seconds: i64,
        found_seconds: i64,
    },

    #[error("market list must not be empty")]
    NoMarkets,

    #[error("duplicate market identifier: {0}")]
    DuplicateMarket(MarketId),

    #[error("missing price for market {market} at {at}")]
    MissingPrice { market: MarketId, at: DateTime<Utc> },

    #[error("missing operational cost at {0}")]
    MissingOperationalCost(DateTime<Utc>),

    #[error("missing capital expenditure at {0}")]
    MissingCapex(DateTime<Utc>),

    #[error("invalid battery parameters: {0}")]
    InvalidBattery(String),

    #[error("solver failed: {0}")]
    Solver(#[from] ResolutionError),
}
