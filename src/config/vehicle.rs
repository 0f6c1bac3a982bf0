use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::SweepConfig;

fn unit_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub name: String,
    /// STL surface mesh; relative paths resolve against the config file.
    pub mesh_path: PathBuf,
    /// Reference (midsection) area, m².
    pub reference_area: f64,
    /// Uniform factor from mesh units to metres.
    #[serde(default = "unit_scale")]
    pub mesh_scale: f64,
}

impl VehicleConfig {
    /// Blunt capsule with a mesh in millimetres.
    pub fn capsule() -> Self {
        Self {
            name: "capsule".to_string(),
            mesh_path: PathBuf::from("data/capsule.stl"),
            reference_area: 3.8,
            mesh_scale: 1e-3,
        }
    }

    /// Slender cone-cylinder body.
    pub fn slender_body() -> Self {
        Self {
            name: "slender_body".to_string(),
            mesh_path: PathBuf::from("data/slender_body.stl"),
            reference_area: 0.785,
            mesh_scale: 1.0,
        }
    }
}

/// A vehicle with the flight conditions to sweep it through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleCase {
    pub vehicle: VehicleConfig,
    pub flight: SweepConfig,
}
