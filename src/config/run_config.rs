use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::config::{SweepConfig, VehicleCase, VehicleConfig};

/// Top-level run file: a list of vehicle cases and the one to compute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub active: usize,
    pub vehicles: Vec<VehicleCase>,
}

impl RunConfig {
    pub fn single(vehicle: VehicleConfig, flight: SweepConfig) -> Self {
        Self {
            active: 0,
            vehicles: vec![VehicleCase { vehicle, flight }],
        }
    }

    /// Loads a JSON run file. Relative mesh paths are resolved against the
    /// directory of the file.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading run config {}", path.display()))?;
        let mut config: RunConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing run config {}", path.display()))?;

        if let Some(base) = path.parent() {
            for case in &mut config.vehicles {
                if case.vehicle.mesh_path.is_relative() {
                    case.vehicle.mesh_path = base.join(&case.vehicle.mesh_path);
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn active_case(&self) -> anyhow::Result<&VehicleCase> {
        self.vehicles.get(self.active).with_context(|| {
            format!(
                "active case {} out of range ({} vehicle case(s))",
                self.active,
                self.vehicles.len()
            )
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let case = self.active_case()?;
        let VehicleCase { vehicle, flight } = case;

        if !(vehicle.reference_area.is_finite() && vehicle.reference_area > 0.0) {
            bail!(
                "vehicle {}: reference area must be positive, got {}",
                vehicle.name,
                vehicle.reference_area
            );
        }
        if !(vehicle.mesh_scale.is_finite() && vehicle.mesh_scale > 0.0) {
            bail!("vehicle {}: mesh scale must be positive", vehicle.name);
        }
        if flight.mach.is_empty() {
            bail!("vehicle {}: Mach list is empty", vehicle.name);
        }
        if let Some(mach) = flight.mach.iter().find(|m| !(m.is_finite() && **m > 1.0)) {
            bail!(
                "vehicle {}: Mach {} is outside the supersonic range",
                vehicle.name,
                mach
            );
        }
        for (i, mach) in flight.mach.iter().enumerate() {
            if flight.mach[..i].contains(mach) {
                bail!("vehicle {}: Mach {} is listed twice", vehicle.name, mach);
            }
        }
        if !flight.altitude.is_finite()
            || !flight.sideslip.is_finite()
            || flight.alpha.iter().any(|a| !a.is_finite())
        {
            bail!("vehicle {}: non-finite flight condition", vehicle.name);
        }
        Ok(())
    }
}
