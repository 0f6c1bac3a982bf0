use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::aero::{AtmosphereProvider, FreestreamState};
use crate::config::{SweepConfig, VehicleCase, VehicleConfig};
use crate::geometry::{read_stl, Extents, Geometry, Panel};
use crate::solver::SweepResult;

/// Geometry summary carried into the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySummary {
    pub n_panels: usize,
    pub extents: Extents,
    pub reference_area: f64,
    pub wetted_area: f64,
    pub nose_x: f64,
    pub xcs: f64,
    pub ycs: f64,
}

impl GeometrySummary {
    pub fn of(geometry: &Geometry) -> Self {
        Self {
            n_panels: geometry.n_panels(),
            extents: geometry.extents,
            reference_area: geometry.reference_area,
            wetted_area: geometry.wetted_area,
            nose_x: geometry.nose_x,
            xcs: geometry.xcs,
            ycs: geometry.ycs,
        }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub vehicle: VehicleConfig,
    pub flight: SweepConfig,
    pub geometry: GeometrySummary,
    pub freestream: FreestreamState,
    /// Angles of attack actually swept, rad.
    pub alpha: Vec<f64>,
    pub sweep: SweepResult,
}

/// One vehicle case: prepared geometry, ready to sweep.
pub struct AdxRun {
    pub case: VehicleCase,
    pub geometry: Geometry,
}

impl AdxRun {
    /// Reads the mesh and builds the geometry snapshot.
    pub fn prepare(case: VehicleCase) -> anyhow::Result<Self> {
        let vehicle = &case.vehicle;
        let panels = read_stl(&vehicle.mesh_path, vehicle.mesh_scale)
            .with_context(|| format!("loading mesh {}", vehicle.mesh_path.display()))?;
        Self::from_panels(case, panels)
    }

    /// Builds the run from panels already in memory.
    pub fn from_panels(case: VehicleCase, panels: Vec<Panel>) -> anyhow::Result<Self> {
        let geometry = Geometry::init(panels, case.vehicle.reference_area)
            .with_context(|| format!("preparing geometry of {}", case.vehicle.name))?;

        log::info!(
            "geometry ready: {} ({} panels, L = {:.3} m, S = {:.3} m2)",
            case.vehicle.name,
            geometry.n_panels(),
            geometry.size(),
            geometry.reference_area
        );
        Ok(Self { case, geometry })
    }

    /// Resolves the freestream at the configured altitude and sweeps Mach x alpha.
    pub fn execute(&self, atmosphere: &dyn AtmosphereProvider) -> anyhow::Result<RunOutput> {
        let flight = &self.case.flight;
        let freestream = atmosphere
            .freestream(flight.altitude)
            .with_context(|| format!("atmosphere at {} m", flight.altitude))?;
        log::info!(
            "freestream at H = {:.0} m: P = {:.4e} Pa, T = {:.2} K, a = {:.2} m/s",
            flight.altitude,
            freestream.pressure,
            freestream.temperature,
            freestream.sound_speed
        );

        let alpha = flight.alpha_radians();
        log::info!(
            "sweeping {} Mach x {} alpha points",
            flight.mach.len(),
            alpha.len()
        );
        let sweep = self
            .geometry
            .compute_table(&flight.mach, &alpha, flight.sideslip_radians(), &freestream)
            .context("computing coefficient table")?;

        let output = RunOutput {
            vehicle: self.case.vehicle.clone(),
            flight: flight.clone(),
            geometry: GeometrySummary::of(&self.geometry),
            freestream,
            alpha,
            sweep,
        };
        Self::log_summary(&output);
        Ok(output)
    }

    fn log_summary(output: &RunOutput) {
        let extents = output.geometry.extents;
        log::info!(
            "geometry: length {:.4} m, height {:.4} m, width {:.4} m, Smid {:.4} m2",
            extents.size,
            extents.height,
            extents.width,
            output.geometry.reference_area
        );
        for params in &output.sweep.parameters {
            log::info!(
                "Mach {:>6.2}  Re {:.4e}  Kn {:.4e}",
                params.mach,
                params.reynolds,
                params.knudsen
            );
        }
        if !output.sweep.is_complete() {
            log::warn!("{} cell(s) incomplete", output.sweep.failures.len());
        }
    }
}
