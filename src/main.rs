use anyhow::{Context, Result};
use bess_dispatch::config::Config;
use bess_dispatch::domain::{CostPoint, CostSchedule, PricePoint, PriceTable, TimeGrid};
use bess_dispatch::optimizer::{DispatchOptimizer, DispatchScenario, LpDispatchStrategy};
use bess_dispatch::telemetry::init_tracing;
use itertools::Itertools;
use std::fs;
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;
    let scenario = load_scenario(&cfg)?;

    info!(
        markets = scenario.markets.len(),
        periods = scenario.grid.len(),
        solver = %cfg.dispatch.solver,
        "optimizing dispatch"
    );

    let optimizer = DispatchOptimizer {
        strategy: Box::new(LpDispatchStrategy),
    };
    let schedule = optimizer.optimize(&scenario, &cfg.dispatch).await?;

    info!(
        gross_profit = schedule.gross_profit,
        net_profit = schedule.net_profit,
        "dispatch schedule ready"
    );
    println!("{}", serde_json::to_string_pretty(&schedule)?);
    Ok(())
}

/// Assembles the scenario from the configured input files. Markets keep
/// their first-seen order; the time grid is the sorted set of price times.
fn load_scenario(cfg: &Config) -> Result<DispatchScenario> {
    let points = read_price_points(&cfg.input.prices)?;

    let markets = points.iter().map(|p| p.market.clone()).unique().collect();
    let times: Vec<_> = points.iter().map(|p| p.time).sorted().dedup().collect();
    let grid = TimeGrid::new(times).context("price feed does not form a usable time grid")?;
    let prices = PriceTable::from_points(points);

    let costs = if cfg.dispatch.consider_fees {
        let operational = match &cfg.input.operational_costs {
            Some(path) => read_cost_points(path)?,
            None => Vec::new(),
        };
        let capex = match &cfg.input.capex {
            Some(path) => read_cost_points(path)?,
            None => Vec::new(),
        };
        CostSchedule::from_points(operational, capex)
    } else {
        CostSchedule::new()
    };

    Ok(DispatchScenario {
        markets,
        grid,
        prices,
        costs,
        battery: cfg.battery.clone(),
    })
}

fn read_price_points(path: &Path) -> Result<Vec<PricePoint>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read price file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse price file {}", path.display()))
}

fn read_cost_points(path: &Path) -> Result<Vec<CostPoint>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read cost file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse cost file {}", path.display()))
}
