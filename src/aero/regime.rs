use serde::{Deserialize, Serialize};

use crate::aero::gas_dynamics::{continuum_delta_p, free_molecular_delta_p, ShockLimits};
use crate::aero::FreestreamState;
use crate::error::AeroError;

/// Knudsen number below which the flow is treated as continuum.
pub const KNUDSEN_CONTINUUM: f64 = 1e-2;
/// Knudsen number from which the flow is treated as free-molecular.
pub const KNUDSEN_FREE_MOLECULAR: f64 = 10.0;

/// Rarefaction regime selected from the Knudsen number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlowRegime {
    Continuum,
    /// Log-linear bridge; `continuum_weight` goes from 1 at Kn = 0.01 to 0 at Kn = 10.
    Transitional { continuum_weight: f64 },
    FreeMolecular,
}

impl FlowRegime {
    pub fn from_knudsen(knudsen: f64) -> Self {
        if knudsen < KNUDSEN_CONTINUUM {
            FlowRegime::Continuum
        } else if knudsen < KNUDSEN_FREE_MOLECULAR {
            FlowRegime::Transitional {
                continuum_weight: (2.3026 - knudsen.ln()) / 6.908,
            }
        } else {
            FlowRegime::FreeMolecular
        }
    }

    /// Share of the continuum model in the blended pressure.
    pub fn continuum_weight(&self) -> f64 {
        match self {
            FlowRegime::Continuum => 1.0,
            FlowRegime::Transitional { continuum_weight } => *continuum_weight,
            FlowRegime::FreeMolecular => 0.0,
        }
    }

    /// Blended `deltaP` on a panel at the given local incidence.
    ///
    /// Only the models with non-zero weight are evaluated.
    pub fn delta_p(
        &self,
        limits: &ShockLimits,
        incidence: f64,
        mach: f64,
        flow: &FreestreamState,
    ) -> Result<f64, AeroError> {
        let continuum = || continuum_delta_p(limits, incidence, mach, flow.k);
        let free_molecular = || {
            free_molecular_delta_p(incidence, mach, flow.k, flow.sound_speed, flow.thermal_speed)
        };

        match self {
            FlowRegime::Continuum => continuum(),
            FlowRegime::Transitional { continuum_weight } => {
                let w = *continuum_weight;
                Ok(w * continuum()? + (1.0 - w) * free_molecular()?)
            }
            FlowRegime::FreeMolecular => free_molecular(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aero::gas_dynamics::shock_limits;
    use crate::math::DEG_TO_RAD;

    #[test]
    fn regime_boundaries() {
        assert_eq!(FlowRegime::from_knudsen(1e-4), FlowRegime::Continuum);
        assert!(matches!(FlowRegime::from_knudsen(0.01), FlowRegime::Transitional { .. }));
        assert!(matches!(FlowRegime::from_knudsen(9.99), FlowRegime::Transitional { .. }));
        assert_eq!(FlowRegime::from_knudsen(10.0), FlowRegime::FreeMolecular);
    }

    #[test]
    fn bridge_weight_spans_three_decades() {
        let at_low = FlowRegime::from_knudsen(0.01).continuum_weight();
        assert!((at_low - 1.0).abs() < 1e-4);
        let mid = FlowRegime::from_knudsen(0.316_227_766).continuum_weight();
        assert!((mid - 0.5).abs() < 1e-4);
        let near_high = FlowRegime::from_knudsen(9.999_999).continuum_weight();
        assert!(near_high.abs() < 1e-4);
    }

    #[test]
    fn blend_matches_pure_models_at_the_ends() {
        let flow = FreestreamState::from_pressure_temperature(1.0, 200.0);
        let mach = 8.0;
        let limits = shock_limits(mach, flow.k).unwrap();

        for deg in [-30.0, 0.0, 15.0, 60.0] {
            let nu = deg * DEG_TO_RAD;
            let continuum = continuum_delta_p(&limits, nu, mach, flow.k).unwrap();
            let fm = free_molecular_delta_p(nu, mach, flow.k, flow.sound_speed, flow.thermal_speed)
                .unwrap();

            let low = FlowRegime::from_knudsen(0.01).delta_p(&limits, nu, mach, &flow).unwrap();
            assert!((low - continuum).abs() <= 1e-4 * (continuum.abs() + fm.abs()) + 1e-12);

            let high = FlowRegime::from_knudsen(10.0).delta_p(&limits, nu, mach, &flow).unwrap();
            assert_eq!(high, fm);
        }
    }
}
