use nalgebra::{Matrix2, Vector2};

use crate::aero::{AerodynamicPoint, CenterOfPressure};
use crate::error::AeroError;
use crate::math::{solve_2x2, DEG_TO_RAD};

/// Extra angle of attack for the second load case of the moment balance.
pub const CENTER_OF_PRESSURE_STEP: f64 = 10.0 * DEG_TO_RAD;

/// Center of pressure from two load cases of the same Mach.
///
/// Solves `Mz = Fy·x + Fx·y` for both cases. `x` is turned into a station
/// measured back from the nose at body-axis `nose_x`.
pub fn center_of_pressure(
    current: &AerodynamicPoint,
    shifted: &AerodynamicPoint,
    nose_x: f64,
) -> Result<CenterOfPressure, AeroError> {
    let m = Matrix2::new(current.fy, current.fx, shifted.fy, shifted.fx);
    let b = Vector2::new(current.mz, shifted.mz);
    let cd = solve_2x2(&m, &b)?;
    Ok(CenterOfPressure {
        xcd: nose_x - cd[0],
        ycd: cd[1],
    })
}
