//! Panel-method aerodynamic coefficient tables for arbitrary triangulated
//! bodies, from supersonic continuum flow through the transitional regime to
//! free-molecular flow.

pub mod math;
pub mod error;
pub mod geometry;
pub mod aero;
pub mod solver;
pub mod config;
pub mod run;
pub mod report;
pub mod logging;

pub use aero::{
    AerodynamicPoint, AtmosphereProvider, CenterOfPressure, FlowRegimeParameters, FreestreamState,
    StandardAtmosphere, TabulatedAtmosphere,
};
pub use config::{RunConfig, SweepConfig, VehicleCase, VehicleConfig};
pub use error::AeroError;
pub use geometry::{Geometry, Panel};
pub use math::Vec3;
pub use run::{AdxRun, RunOutput};
pub use solver::{AdxTable, CellFailure, SweepResult};
