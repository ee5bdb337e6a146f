use anyhow::{Context, Result};
use async_trait::async_trait;
use itertools::Itertools;

use crate::config::DispatchConfig;
use crate::domain::{BatteryParams, CostSchedule, DispatchSchedule, MarketId, PriceTable, TimeGrid};

use super::error::ModelError;
use super::model::DispatchModel;

/// Everything the model formulation consumes, supplied by the loading layer.
#[derive(Debug, Clone)]
pub struct DispatchScenario {
    pub markets: Vec<MarketId>,
    pub grid: TimeGrid,
    pub prices: PriceTable,
    pub costs: CostSchedule,
    pub battery: BatteryParams,
}

impl DispatchScenario {
    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if self.markets.is_empty() {
            return Err(ModelError::NoMarkets);
        }
        if let Some(dup) = self.markets.iter().duplicates().next() {
            return Err(ModelError::DuplicateMarket(dup.clone()));
        }
        self.battery.validate()
    }
}

#[async_trait]
pub trait DispatchStrategy: Send + Sync {
    async fn optimize(
        &self,
        scenario: &DispatchScenario,
        config: &DispatchConfig,
    ) -> Result<DispatchSchedule>;
}

/// Exact dispatch via the LP formulation in this crate.
pub struct LpDispatchStrategy;

#[async_trait]
impl DispatchStrategy for LpDispatchStrategy {
    async fn optimize(
        &self,
        scenario: &DispatchScenario,
        config: &DispatchConfig,
    ) -> Result<DispatchSchedule> {
        let model =
            DispatchModel::build(scenario, config).context("failed to assemble dispatch model")?;
        let solution = model.solve().context("dispatch solve failed")?;
        Ok(solution.into_schedule())
    }
}

pub struct DispatchOptimizer {
    pub strategy: Box<dyn DispatchStrategy>,
}

impl DispatchOptimizer {
    pub async fn optimize(
        &self,
        scenario: &DispatchScenario,
        config: &DispatchConfig,
    ) -> Result<DispatchSchedule> {
        self.strategy.optimize(scenario, config).await
    }
}
