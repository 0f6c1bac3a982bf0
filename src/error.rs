//! Error type for the aerodynamic core.

use thiserror::Error;

/// Failure kinds of the aerodynamic core.
///
/// Geometry and per-Mach domain errors fail a whole run. Single-cell domain
/// errors and singular center-of-pressure solves are recorded per cell by the
/// sweep engine instead of being propagated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AeroError {
    /// The panel set is empty.
    #[error("Geometry error: panel set is empty")]
    EmptyGeometry,

    /// All panels are degenerate.
    #[error("Geometry error: wetted area is zero")]
    ZeroWettedArea,

    /// Reference area is zero, negative or not finite.
    #[error("Geometry error: invalid reference area {0}")]
    InvalidReferenceArea(f64),

    /// A panel vertex or normal is not finite.
    #[error("Geometry error: panel {0} has non-finite coordinates")]
    NonFinitePanel(usize),

    /// The center-of-pressure system has a near-zero determinant.
    #[error("Numerical singularity: determinant {determinant:e}")]
    NumericalSingularity { determinant: f64 },

    /// An input lies outside the range where the pressure models apply.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl AeroError {
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            Self::EmptyGeometry
                | Self::ZeroWettedArea
                | Self::InvalidReferenceArea(_)
                | Self::NonFinitePanel(_)
        )
    }
}
