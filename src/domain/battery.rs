use serde::{Deserialize, Serialize};

use crate::optimizer::ModelError;

/// Physical battery parameters consumed by the model formulation.
///
/// Energies in kWh, powers in kW, retention/efficiency as fractions in (0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryParams {
    /// Lower state-of-charge bound (kWh).
    pub soc_min_kwh: f64,
    /// Upper state-of-charge bound, i.e. usable capacity (kWh).
    pub soc_max_kwh: f64,
    /// Self-discharge retention factor per period (γ_s).
    pub retention: f64,
    /// Charge efficiency (γ_c).
    pub charge_efficiency: f64,
    /// Discharge efficiency (γ_d).
    pub discharge_efficiency: f64,
    /// Maximum aggregate charge power across markets (kW).
    pub max_charge_kw: f64,
    /// Maximum aggregate discharge power across markets (kW).
    pub max_discharge_kw: f64,
}

impl Default for BatteryParams {
    fn default() -> Self {
        Self {
            soc_min_kwh: 0.0,
            soc_max_kwh: 10.0,
            retention: 1.0,
            charge_efficiency: 0.95,
            discharge_efficiency: 0.95,
            max_charge_kw: 5.0,
            max_discharge_kw: 5.0,
        }
    }
}

impl BatteryParams {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.soc_min_kwh <= self.soc_max_kwh) {
            return Err(ModelError::InvalidBattery(format!(
                "soc_min_kwh {} must not exceed soc_max_kwh {}",
                self.soc_min_kwh, self.soc_max_kwh
            )));
        }
        for (name, value) in [
            ("retention", self.retention),
            ("charge_efficiency", self.charge_efficiency),
            ("discharge_efficiency", self.discharge_efficiency),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ModelError::InvalidBattery(format!(
                    "{name} {value} must lie in (0, 1]"
                )));
            }
        }
        for (name, value) in [
            ("max_charge_kw", self.max_charge_kw),
            ("max_discharge_kw", self.max_discharge_kw),
        ] {
            if !(value >= 0.0) {
                return Err(ModelError::InvalidBattery(format!(
                    "{name} {value} must be non-negative"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_params_are_valid() {
        assert!(BatteryParams::default().validate().is_ok());
    }

    #[rstest]
    #[case::soc_bounds_swapped(|p: &mut BatteryParams| p.soc_min_kwh = p.soc_max_kwh + 1.0)]
    #[case::zero_retention(|p: &mut BatteryParams| p.retention = 0.0)]
    #[case::efficiency_above_one(|p: &mut BatteryParams| p.charge_efficiency = 1.2)]
    #[case::negative_efficiency(|p: &mut BatteryParams| p.discharge_efficiency = -0.5)]
    #[case::nan_efficiency(|p: &mut BatteryParams| p.charge_efficiency = f64::NAN)]
    #[case::negative_charge_rate(|p: &mut BatteryParams| p.max_charge_kw = -1.0)]
    #[case::negative_discharge_rate(|p: &mut BatteryParams| p.max_discharge_kw = -0.1)]
    fn test_invalid_params(#[case] mutate: fn(&mut BatteryParams)) {
        let mut params = BatteryParams::default();
        mutate(&mut params);
        assert!(matches!(
            params.validate(),
            Err(ModelError::InvalidBattery(_))
        ));
    }

    #[test]
    fn test_zero_rates_are_allowed() {
        let params = BatteryParams {
            max_charge_kw: 0.0,
            max_discharge_kw: 0.0,
            ..BatteryParams::default()
        };
        assert!(params.validate().is_ok());
    }
}
