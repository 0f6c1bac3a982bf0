use nalgebra::{Matrix2, Vector2};

use crate::error::AeroError;

/// Relative determinant threshold below which a 2x2 system is treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Solves `m * x = b` by Cramer's rule.
///
/// The determinant is compared against `SINGULAR_EPSILON` scaled by the
/// square of the largest matrix entry, so the test does not depend on the
/// units of the system. A singular or non-finite system is reported as
/// `AeroError::NumericalSingularity`; no infinite or NaN solution is ever
/// returned.
pub fn solve_2x2(m: &Matrix2<f64>, b: &Vector2<f64>) -> Result<Vector2<f64>, AeroError> {
    let det = m.determinant();
    let scale = m.amax();
    if !det.is_finite() || det.abs() <= SINGULAR_EPSILON * scale * scale {
        return Err(AeroError::NumericalSingularity { determinant: det });
    }

    let x0 = (b[0] * m[(1, 1)] - m[(0, 1)] * b[1]) / det;
    let x1 = (m[(0, 0)] * b[1] - b[0] * m[(1, 0)]) / det;
    if !(x0.is_finite() && x1.is_finite()) {
        return Err(AeroError::NumericalSingularity { determinant: det });
    }
    Ok(Vector2::new(x0, x1))
}
