use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Running sums of panel forces and moments in body axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanelLoads {
    pub force: Vec3,
    pub torque: Vec3,
}

impl PanelLoads {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Load of one panel: `force` applied at `center`.
    ///
    /// The moment arm only couples each force component with the transverse
    /// coordinates of the panel centroid.
    pub fn at(force: Vec3, center: Vec3) -> Self {
        let Vec3 { x: dx, y: dy, z: dz } = force;
        Self {
            force,
            torque: Vec3::new(
                dy * center.z + dz * center.y,
                dx * center.z + dz * center.x,
                dx * center.y + dy * center.x,
            ),
        }
    }

    pub fn accumulate(&mut self, other: &PanelLoads) {
        self.force += other.force;
        self.torque += other.torque;
    }
}

impl std::ops::Add for PanelLoads {
    type Output = Self;
    fn add(mut self, other: Self) -> Self {
        self.accumulate(&other);
        self
    }
}

/// Center of pressure of one sweep cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterOfPressure {
    /// Station from the nose, same convention as the surface centroid.
    pub xcd: f64,
    /// Offset from the local vertical.
    pub ycd: f64,
}

/// Forces and coefficients at one (Mach, alpha, beta).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AerodynamicPoint {
    pub mach: f64,
    /// Angle of attack, rad.
    pub alpha: f64,
    /// Sideslip, rad.
    pub beta: f64,
    /// Drag force (negated axial sum), N.
    pub fx: f64,
    /// Normal force, N.
    pub fy: f64,
    /// Side force, N.
    pub fz: f64,
    pub cx: f64,
    pub cy: f64,
    pub cz: f64,
    /// Wind-axis drag coefficient including skin friction.
    pub cxa: f64,
    /// Wind-axis lift coefficient.
    pub cya: f64,
    /// Lift-to-drag ratio Cya/Cxa; unguarded against Cxa near zero.
    pub k: f64,
    pub mx: f64,
    pub my: f64,
    pub mz: f64,
    /// Skin-friction coefficient included in `cxa`.
    pub cxf: f64,
    pub center_of_pressure: Option<CenterOfPressure>,
}

impl AerodynamicPoint {
    /// Assembles the coefficients from summed loads.
    ///
    /// `qs` is dynamic pressure times reference area.
    pub fn from_loads(
        loads: &PanelLoads,
        qs: f64,
        mach: f64,
        alpha: f64,
        beta: f64,
        skin_friction: f64,
    ) -> Self {
        let fx = -loads.force.x;
        let fy = loads.force.y;
        let fz = loads.force.z;
        let cx = fx / qs;
        let cy = fy / qs;
        let cz = fz / qs;

        let (sa, ca) = alpha.sin_cos();
        let cxa = cx * ca + cy * sa + skin_friction;
        let cya = cy * ca - cx * sa;

        Self {
            mach,
            alpha,
            beta,
            fx,
            fy,
            fz,
            cx,
            cy,
            cz,
            cxa,
            cya,
            k: cya / cxa,
            mx: loads.torque.x,
            my: loads.torque.y,
            mz: loads.torque.z,
            cxf: skin_friction,
            center_of_pressure: None,
        }
    }

    /// Placeholder for a cell whose evaluation failed.
    pub fn undefined(mach: f64, alpha: f64, beta: f64) -> Self {
        let nan = f64::NAN;
        Self {
            mach,
            alpha,
            beta,
            fx: nan,
            fy: nan,
            fz: nan,
            cx: nan,
            cy: nan,
            cz: nan,
            cxa: nan,
            cya: nan,
            k: nan,
            mx: nan,
            my: nan,
            mz: nan,
            cxf: nan,
            center_of_pressure: None,
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.fx.is_nan()
    }

    pub fn alpha_deg(&self) -> f64 {
        self.alpha.to_degrees()
    }
}
