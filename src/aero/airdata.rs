use serde::{Deserialize, Serialize};

use crate::aero::gas_dynamics::{shock_limits, ShockLimits};
use crate::aero::{FlowRegime, FreestreamState};
use crate::error::AeroError;
use crate::geometry::Geometry;

/// Flow quantities that depend on Mach only, shared by every alpha in a row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowRegimeParameters {
    pub mach: f64,
    pub reynolds: f64,
    pub knudsen: f64,
    /// Skin-friction drag coefficient added to wind-axis drag.
    pub skin_friction: f64,
    /// 0.5·k·P·M², Pa.
    pub dynamic_pressure: f64,
    pub shock_limits: ShockLimits,
    pub regime: FlowRegime,
}

impl FlowRegimeParameters {
    pub fn at_mach(
        mach: f64,
        flow: &FreestreamState,
        geometry: &Geometry,
    ) -> Result<Self, AeroError> {
        let reynolds = reynolds_number(mach, flow, geometry.size());
        if !(reynolds.is_finite() && reynolds > 0.0) {
            return Err(AeroError::Domain(format!(
                "Reynolds number {} at Mach {} (characteristic length {})",
                reynolds,
                mach,
                geometry.size()
            )));
        }
        let knudsen = knudsen_number(mach, flow.k, reynolds);
        let skin_friction =
            0.074 * reynolds.powf(-0.2) * geometry.wetted_area / geometry.reference_area;

        Ok(Self {
            mach,
            reynolds,
            knudsen,
            skin_friction,
            dynamic_pressure: compute_dynamic_pressure(flow, mach),
            shock_limits: shock_limits(mach, flow.k)?,
            regime: FlowRegime::from_knudsen(knudsen),
        })
    }
}

/// Re = M·a·L/ν with ν the kinematic viscosity.
pub fn reynolds_number(mach: f64, flow: &FreestreamState, length: f64) -> f64 {
    mach * flow.sound_speed * length / flow.viscosity
}

/// Kn = M·sqrt(k·π/2)/Re.
pub fn knudsen_number(mach: f64, k: f64, reynolds: f64) -> f64 {
    mach * (0.5 * k * std::f64::consts::PI).sqrt() / reynolds
}

/// q = 0.5·k·P·M².
pub fn compute_dynamic_pressure(flow: &FreestreamState, mach: f64) -> f64 {
    0.5 * flow.k * flow.pressure * mach * mach
}
