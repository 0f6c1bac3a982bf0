use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AeroError;

pub const GAS_CONSTANT_AIR: f64 = 287.053;
pub const ADIABATIC_INDEX_AIR: f64 = 1.4;
pub const EARTH_RADIUS: f64 = 6_356_766.0;
pub const STANDARD_GRAVITY: f64 = 9.80665;

const SUTHERLAND_BETA: f64 = 1.458e-6;
const SUTHERLAND_S: f64 = 110.4;

/// Undisturbed flow ahead of the vehicle at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreestreamState {
    /// Static pressure, Pa.
    pub pressure: f64,
    /// Density, kg/m³.
    pub density: f64,
    /// Static temperature, K.
    pub temperature: f64,
    /// Adiabatic index.
    pub k: f64,
    /// Speed of sound, m/s.
    pub sound_speed: f64,
    /// Kinematic viscosity, m²/s.
    pub viscosity: f64,
    /// Most probable molecular speed sqrt(2RT), m/s.
    pub thermal_speed: f64,
}

impl FreestreamState {
    /// Air at the given pressure and temperature; viscosity from Sutherland's law.
    pub fn from_pressure_temperature(pressure: f64, temperature: f64) -> Self {
        let k = ADIABATIC_INDEX_AIR;
        let density = pressure / (GAS_CONSTANT_AIR * temperature);
        let dynamic_viscosity =
            SUTHERLAND_BETA * temperature.powf(1.5) / (temperature + SUTHERLAND_S);

        Self {
            pressure,
            density,
            temperature,
            k,
            sound_speed: (k * GAS_CONSTANT_AIR * temperature).sqrt(),
            viscosity: dynamic_viscosity / density,
            thermal_speed: (2.0 * GAS_CONSTANT_AIR * temperature).sqrt(),
        }
    }

    pub fn sea_level() -> Self {
        Self::from_pressure_temperature(101_325.0, 288.15)
    }

    pub fn validate(&self) -> Result<(), AeroError> {
        let fields = [
            ("pressure", self.pressure),
            ("density", self.density),
            ("temperature", self.temperature),
            ("sound_speed", self.sound_speed),
            ("viscosity", self.viscosity),
            ("thermal_speed", self.thermal_speed),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(AeroError::Domain(format!(
                    "freestream {} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        if !self.k.is_finite() || self.k <= 1.0 {
            return Err(AeroError::Domain(format!(
                "adiabatic index must exceed 1, got {}",
                self.k
            )));
        }
        Ok(())
    }
}

/// Supplies the freestream state for a flight altitude.
pub trait AtmosphereProvider {
    fn freestream(&self, altitude: f64) -> Result<FreestreamState, AeroError>;
}

/// 1976 US standard atmosphere up to 86 km, isothermal above.
#[derive(Debug, Clone, Default)]
pub struct StandardAtmosphere;

/// (base geopotential altitude m, base temperature K, lapse rate K/m, base pressure Pa)
const LAYERS: [(f64, f64, f64, f64); 7] = [
    (0.0, 288.15, -0.0065, 101_325.0),
    (11_000.0, 216.65, 0.0, 22_632.06),
    (20_000.0, 216.65, 0.001, 5_474.889),
    (32_000.0, 228.65, 0.0028, 868.0187),
    (47_000.0, 270.65, 0.0, 110.9063),
    (51_000.0, 270.65, -0.0028, 66.93887),
    (71_000.0, 214.65, -0.002, 3.956420),
];
const TOP_GEOPOTENTIAL: f64 = 84_852.0;

impl StandardAtmosphere {
    pub fn new() -> Self {
        Self
    }

    fn pressure_temperature(altitude: f64) -> (f64, f64) {
        let h = EARTH_RADIUS * altitude / (EARTH_RADIUS + altitude);
        let g_over_r = STANDARD_GRAVITY / GAS_CONSTANT_AIR;

        let layer = LAYERS
            .iter()
            .rev()
            .find(|(base, ..)| h >= *base)
            .copied()
            .unwrap_or(LAYERS[0]);

        // Past the last tabulated layer, continue isothermally from its top.
        let layer = if h > TOP_GEOPOTENTIAL {
            let (t_top, p_top) = Self::layer_state(layer, TOP_GEOPOTENTIAL, g_over_r);
            (TOP_GEOPOTENTIAL, t_top, 0.0, p_top)
        } else {
            layer
        };

        let (t, p) = Self::layer_state(layer, h, g_over_r);
        (p, t)
    }

    fn layer_state(layer: (f64, f64, f64, f64), h: f64, g_over_r: f64) -> (f64, f64) {
        let (base, t_base, lapse, p_base) = layer;
        let dh = h - base;
        if lapse == 0.0 {
            (t_base, p_base * (-g_over_r * dh / t_base).exp())
        } else {
            let t = t_base + lapse * dh;
            (t, p_base * (t / t_base).powf(-g_over_r / lapse))
        }
    }
}

impl AtmosphereProvider for StandardAtmosphere {
    fn freestream(&self, altitude: f64) -> Result<FreestreamState, AeroError> {
        if !altitude.is_finite() || altitude < -5_000.0 {
            return Err(AeroError::Domain(format!("altitude {} m out of range", altitude)));
        }
        let (p, t) = Self::pressure_temperature(altitude);
        let state = FreestreamState::from_pressure_temperature(p, t);
        state.validate()?;
        Ok(state)
    }
}

/// One row of a tabulated atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereRow {
    pub altitude: f64,
    pub pressure: f64,
    pub temperature: f64,
}

/// Atmosphere interpolated from altitude-sorted rows.
///
/// Pressure is interpolated log-linearly, temperature linearly; altitudes
/// outside the table are clamped to its ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabulatedAtmosphere {
    rows: Vec<AtmosphereRow>,
}

impl TabulatedAtmosphere {
    pub fn new(mut rows: Vec<AtmosphereRow>) -> Result<Self, AeroError> {
        if rows.is_empty() {
            return Err(AeroError::Domain("atmosphere table is empty".to_string()));
        }
        if rows
            .iter()
            .any(|r| !(r.pressure > 0.0 && r.temperature > 0.0 && r.altitude.is_finite()))
        {
            return Err(AeroError::Domain(
                "atmosphere table rows need positive pressure and temperature".to_string(),
            ));
        }
        rows.sort_by(|a, b| a.altitude.total_cmp(&b.altitude));
        Ok(Self { rows })
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)?;
        let rows: Vec<AtmosphereRow> = serde_json::from_str(&text)?;
        Ok(Self::new(rows)?)
    }

    pub fn rows(&self) -> &[AtmosphereRow] {
        &self.rows
    }
}

impl AtmosphereProvider for TabulatedAtmosphere {
    fn freestream(&self, altitude: f64) -> Result<FreestreamState, AeroError> {
        if !altitude.is_finite() {
            return Err(AeroError::Domain(format!("altitude {} m out of range", altitude)));
        }
        let upper = self.rows.partition_point(|r| r.altitude <= altitude);
        let (p, t) = if upper == 0 {
            (self.rows[0].pressure, self.rows[0].temperature)
        } else if upper == self.rows.len() {
            let last = self.rows[upper - 1];
            (last.pressure, last.temperature)
        } else {
            let lo = self.rows[upper - 1];
            let hi = self.rows[upper];
            let w = (altitude - lo.altitude) / (hi.altitude - lo.altitude);
            (
                (lo.pressure.ln() + w * (hi.pressure.ln() - lo.pressure.ln())).exp(),
                lo.temperature + w * (hi.temperature - lo.temperature),
            )
        };

        let state = FreestreamState::from_pressure_temperature(p, t);
        state.validate()?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_matches_standard_values() {
        let state = StandardAtmosphere::new().freestream(0.0).unwrap();
        assert!((state.pressure - 101_325.0).abs() < 1e-6);
        assert!((state.density - 1.225).abs() < 1e-3);
        assert!((state.sound_speed - 340.29).abs() < 0.05);
        // Kinematic viscosity of air at sea level is about 1.46e-5 m²/s.
        assert!((state.viscosity - 1.46e-5).abs() < 0.02e-5);
    }

    #[test]
    fn tropopause_and_upper_atmosphere() {
        let atmo = StandardAtmosphere::new();
        let tropo = atmo.freestream(11_019.0).unwrap();
        assert!((tropo.temperature - 216.65).abs() < 0.1);
        assert!((tropo.pressure - 22_632.0).abs() < 30.0);

        let high = atmo.freestream(120_000.0).unwrap();
        let top = atmo.freestream(86_000.0).unwrap();
        assert!(high.pressure < top.pressure);
        assert!(high.pressure > 0.0);
    }

    #[test]
    fn pressure_decreases_with_altitude() {
        let atmo = StandardAtmosphere::new();
        let mut last = f64::INFINITY;
        for km in 0..100 {
            let p = atmo.freestream(km as f64 * 1000.0).unwrap().pressure;
            assert!(p < last);
            last = p;
        }
    }

    #[test]
    fn tabulated_interpolates_and_clamps() {
        let table = TabulatedAtmosphere::new(vec![
            AtmosphereRow { altitude: 10_000.0, pressure: 1_000.0, temperature: 250.0 },
            AtmosphereRow { altitude: 0.0, pressure: 100_000.0, temperature: 290.0 },
        ])
        .unwrap();
        let mid = table.freestream(5_000.0).unwrap();
        assert!((mid.pressure - 10_000.0).abs() < 1e-6);
        assert!((mid.temperature - 270.0).abs() < 1e-9);

        let above = table.freestream(50_000.0).unwrap();
        assert!((above.pressure - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_non_physical_state() {
        let mut state = FreestreamState::sea_level();
        state.pressure = 0.0;
        assert!(matches!(state.validate(), Err(AeroError::Domain(_))));
        let mut state = FreestreamState::sea_level();
        state.k = 1.0;
        assert!(state.validate().is_err());
    }
}
