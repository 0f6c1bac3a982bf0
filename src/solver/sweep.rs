//! Mach x alpha sweep over a prepared geometry.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aero::{AerodynamicPoint, FlowRegimeParameters, FreestreamState};
use crate::error::AeroError;
use crate::geometry::Geometry;
use crate::solver::center_of_pressure::{center_of_pressure, CENTER_OF_PRESSURE_STEP};

/// Coefficient table indexed `[mach][alpha]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdxTable {
    pub rows: Vec<Vec<AerodynamicPoint>>,
}

impl AdxTable {
    pub fn n_mach(&self) -> usize {
        self.rows.len()
    }

    pub fn n_alpha(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, mach_index: usize, alpha_index: usize) -> Option<&AerodynamicPoint> {
        self.rows.get(mach_index)?.get(alpha_index)
    }

    pub fn row(&self, mach_index: usize) -> Option<&[AerodynamicPoint]> {
        self.rows.get(mach_index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AerodynamicPoint> {
        self.rows.iter().flatten()
    }
}

/// Which stage of a cell failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureStage {
    /// The point itself could not be evaluated; the cell holds NaN.
    Evaluation,
    /// Coefficients are valid, the center of pressure is missing.
    CenterOfPressure,
}

/// One cell the sweep could not fully evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellFailure {
    pub mach_index: usize,
    pub alpha_index: usize,
    pub mach: f64,
    /// rad
    pub alpha: f64,
    pub stage: FailureStage,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepResult {
    pub table: AdxTable,
    /// One record per Mach, in input order.
    pub parameters: Vec<FlowRegimeParameters>,
    pub failures: Vec<CellFailure>,
}

impl SweepResult {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Geometry {
    /// Evaluates every (Mach, alpha) pair at fixed sideslip.
    ///
    /// Invalid freestream state or a Mach outside the supported range fails
    /// the whole call. Per-cell failures are recorded and the sweep goes on.
    /// With the `parallel` feature Mach rows are evaluated concurrently; the
    /// output order always follows the inputs.
    pub fn compute_table(
        &self,
        mach_list: &[f64],
        alpha_list: &[f64],
        sideslip: f64,
        flow: &FreestreamState,
    ) -> Result<SweepResult, AeroError> {
        flow.validate()?;
        let parameters = mach_list
            .iter()
            .map(|&mach| FlowRegimeParameters::at_mach(mach, flow, self))
            .collect::<Result<Vec<_>, _>>()?;

        #[cfg(feature = "parallel")]
        let evaluated: Vec<_> = parameters
            .par_iter()
            .enumerate()
            .map(|(i, params)| self.sweep_row(i, params, alpha_list, sideslip, flow))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let evaluated: Vec<_> = parameters
            .iter()
            .enumerate()
            .map(|(i, params)| self.sweep_row(i, params, alpha_list, sideslip, flow))
            .collect();

        let mut rows = Vec::with_capacity(evaluated.len());
        let mut failures = Vec::new();
        for (row, row_failures) in evaluated {
            rows.push(row);
            failures.extend(row_failures);
        }

        if !failures.is_empty() {
            log::warn!(
                "sweep finished with {} failed cell(s) out of {}",
                failures.len(),
                mach_list.len() * alpha_list.len()
            );
        }

        Ok(SweepResult {
            table: AdxTable { rows },
            parameters,
            failures,
        })
    }

    fn sweep_row(
        &self,
        mach_index: usize,
        params: &FlowRegimeParameters,
        alpha_list: &[f64],
        sideslip: f64,
        flow: &FreestreamState,
    ) -> (Vec<AerodynamicPoint>, Vec<CellFailure>) {
        log::debug!(
            "Mach {:.3}: Re {:.4e}, Kn {:.4e}, {:?}",
            params.mach,
            params.reynolds,
            params.knudsen,
            params.regime
        );

        let mut failures = Vec::new();
        let row = alpha_list
            .iter()
            .enumerate()
            .map(|(alpha_index, &alpha)| {
                let fail = |stage, error: AeroError| {
                    log::warn!(
                        "Mach {:.3}, alpha {:.2} deg: {}",
                        params.mach,
                        alpha.to_degrees(),
                        error
                    );
                    CellFailure {
                        mach_index,
                        alpha_index,
                        mach: params.mach,
                        alpha,
                        stage,
                        message: error.to_string(),
                    }
                };

                let mut point = match self.solve_point(params, flow, alpha, sideslip) {
                    Ok(point) => point,
                    Err(error) => {
                        failures.push(fail(FailureStage::Evaluation, error));
                        return AerodynamicPoint::undefined(params.mach, alpha, sideslip);
                    }
                };

                let cop = self
                    .solve_point(params, flow, alpha + CENTER_OF_PRESSURE_STEP, sideslip)
                    .and_then(|shifted| center_of_pressure(&point, &shifted, self.nose_x));
                match cop {
                    Ok(cop) => point.center_of_pressure = Some(cop),
                    Err(error) => failures.push(fail(FailureStage::CenterOfPressure, error)),
                }
                point
            })
            .collect();

        (row, failures)
    }
}
