use serde::{Deserialize, Serialize};

use crate::math::DEG_TO_RAD;

/// Step of the alpha grid used when no angles are given, deg.
pub const DEFAULT_ALPHA_STEP_DEG: f64 = 0.1;
/// Number of points of the default grid: 0° up to but excluding 180°.
pub const DEFAULT_ALPHA_POINTS: usize = 1800;

/// Flight conditions of one sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Geometric altitude, m.
    pub altitude: f64,
    pub mach: Vec<f64>,
    /// Angles of attack; empty means the default 0°..180° grid.
    #[serde(default)]
    pub alpha: Vec<f64>,
    /// `alpha` and `sideslip` are given in radians rather than degrees.
    #[serde(default)]
    pub angles_in_radians: bool,
    #[serde(default)]
    pub sideslip: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            altitude: 0.0,
            mach: vec![2.0],
            alpha: Vec::new(),
            angles_in_radians: false,
            sideslip: 0.0,
        }
    }
}

impl SweepConfig {
    /// Entry-corridor survey from supersonic up to orbital Mach numbers.
    pub fn hypersonic_survey() -> Self {
        Self {
            altitude: 60_000.0,
            mach: vec![2.0, 3.0, 5.0, 8.0, 12.0, 18.0, 25.0],
            alpha: (0..=9).map(|i| 5.0 * i as f64).collect(),
            angles_in_radians: false,
            sideslip: 0.0,
        }
    }

    /// High-altitude case in the transitional regime.
    pub fn rarefied_survey() -> Self {
        Self {
            altitude: 100_000.0,
            mach: vec![10.0, 20.0, 28.0],
            alpha: (0..=18).map(|i| 10.0 * i as f64).collect(),
            angles_in_radians: false,
            sideslip: 0.0,
        }
    }

    /// Angles of attack in radians, expanding an empty list to the default grid.
    pub fn alpha_radians(&self) -> Vec<f64> {
        if self.alpha.is_empty() {
            return (0..DEFAULT_ALPHA_POINTS)
                .map(|i| i as f64 * DEFAULT_ALPHA_STEP_DEG * DEG_TO_RAD)
                .collect();
        }
        if self.angles_in_radians {
            self.alpha.clone()
        } else {
            self.alpha.iter().map(|a| a * DEG_TO_RAD).collect()
        }
    }

    pub fn sideslip_radians(&self) -> f64 {
        if self.angles_in_radians {
            self.sideslip
        } else {
            self.sideslip * DEG_TO_RAD
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_alpha_expands_to_default_grid() {
        let config = SweepConfig::default();
        let alpha = config.alpha_radians();
        assert_eq!(alpha.len(), DEFAULT_ALPHA_POINTS);
        assert_eq!(alpha[0], 0.0);
        assert!((alpha[1].to_degrees() - 0.1).abs() < 1e-9);
        assert!((alpha[DEFAULT_ALPHA_POINTS - 1].to_degrees() - 179.9).abs() < 1e-9);
    }

    #[test]
    fn degrees_are_converted_once() {
        let mut config = SweepConfig::hypersonic_survey();
        config.sideslip = 2.0;
        let alpha = config.alpha_radians();
        assert!((alpha[2] - 10f64.to_radians()).abs() < 1e-12);
        assert!((config.sideslip_radians() - 2f64.to_radians()).abs() < 1e-12);

        config.angles_in_radians = true;
        config.alpha = vec![0.25];
        assert_eq!(config.alpha_radians(), vec![0.25]);
        assert_eq!(config.sideslip_radians(), 2.0);
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let config: SweepConfig =
            serde_json::from_str(r#"{ "altitude": 30000.0, "mach": [3.0, 6.0] }"#).unwrap();
        assert!(config.alpha.is_empty());
        assert!(!config.angles_in_radians);
        assert_eq!(config.sideslip, 0.0);
    }
}
