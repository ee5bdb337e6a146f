use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::BatteryParams;
use crate::solver::SolverBackend;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub battery: BatteryParams,
    pub dispatch: DispatchConfig,
    pub input: InputConfig,
}

/// Model-build configuration, fixed for the lifetime of one model instance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DispatchConfig {
    /// Wire the cycle-count variable and the lifetime budget constraint.
    #[serde(default)]
    pub consider_lifetime: bool,
    /// Equivalent-full-cycle budget; only meaningful with `consider_lifetime`.
    #[serde(default)]
    pub lifetime_cycles: f64,
    /// Deduct operational cost and capex in the net profit recurrence.
    #[serde(default)]
    pub consider_fees: bool,
    #[serde(default)]
    pub solver: SolverBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// JSON file with `PricePoint` rows covering markets x horizon.
    pub prices: PathBuf,
    /// JSON file with per-period operational `CostPoint` rows.
    #[serde(default)]
    pub operational_costs: Option<PathBuf>,
    /// JSON file with per-period capex `CostPoint` rows.
    #[serde(default)]
    pub capex: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("BESS__").split("__"));
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_defaults() {
        let config = DispatchConfig::default();
        assert!(!config.consider_lifetime);
        assert!(!config.consider_fees);
        assert_eq!(config.lifetime_cycles, 0.0);
        assert_eq!(config.solver, SolverBackend::Minilp);
    }

    #[test]
    fn test_extract_from_toml() {
        let config: Config = Figment::new()
            .merge(Toml::string(
                r#"
                [battery]
                soc_min_kwh = 0.0
                soc_max_kwh = 20.0
                retention = 0.99
                charge_efficiency = 0.95
                discharge_efficiency = 0.93
                max_charge_kw = 8.0
                max_discharge_kw = 6.0

                [dispatch]
                consider_lifetime = true
                lifetime_cycles = 5000.0
                solver = "minilp"

                [input]
                prices = "data/prices.json"
                "#,
            ))
            .extract()
            .unwrap();
        assert_eq!(config.battery.soc_max_kwh, 20.0);
        assert!(config.dispatch.consider_lifetime);
        assert!(!config.dispatch.consider_fees);
        assert_eq!(config.dispatch.solver, SolverBackend::Minilp);
        assert_eq!(config.input.prices, PathBuf::from("data/prices.json"));
        assert!(config.input.operational_costs.is_none());
    }
}
