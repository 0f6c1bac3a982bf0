use std::f64::consts::FRAC_PI_2;

use crate::aero::{AerodynamicPoint, FlowRegimeParameters, FreestreamState, PanelLoads};
use crate::error::AeroError;
use crate::geometry::Geometry;
use crate::math::{angle_between, Vec3};

/// Body-axis unit vector of the freestream for the given attitude.
pub fn freestream_direction(alpha: f64, beta: f64) -> Vec3 {
    let (sa, ca) = alpha.sin_cos();
    let (sb, cb) = beta.sin_cos();
    Vec3::new(ca * cb, -sa, ca * sb)
}

/// Angle between the freestream and the panel plane.
///
/// Back-facing panels (normal more than 90° from the freestream vector) get
/// the reflected, negative incidence; they still contribute load.
pub fn local_incidence(velocity: &Vec3, normal: &Vec3) -> f64 {
    let nu0 = angle_between(velocity, normal);
    if nu0.abs() > FRAC_PI_2 {
        -nu0.abs() + FRAC_PI_2
    } else {
        FRAC_PI_2 - nu0.abs()
    }
}

impl Geometry {
    /// Sums blended-pressure panel loads at one (Mach, alpha, beta).
    pub fn panel_loads(
        &self,
        params: &FlowRegimeParameters,
        flow: &FreestreamState,
        alpha: f64,
        beta: f64,
    ) -> Result<PanelLoads, AeroError> {
        let velocity = freestream_direction(alpha, beta);

        self.panel_data()
            .iter()
            .try_fold(PanelLoads::zero(), |mut acc, panel| {
                let incidence = local_incidence(&velocity, &panel.normal);
                let delta_p =
                    params
                        .regime
                        .delta_p(&params.shock_limits, incidence, params.mach, flow)?;
                let local_force = delta_p * flow.pressure * panel.area;
                acc.accumulate(&PanelLoads::at(panel.normal * -local_force, panel.centroid));
                Ok(acc)
            })
    }

    /// Forces, moments and coefficients at one sweep point.
    pub fn solve_point(
        &self,
        params: &FlowRegimeParameters,
        flow: &FreestreamState,
        alpha: f64,
        beta: f64,
    ) -> Result<AerodynamicPoint, AeroError> {
        let loads = self.panel_loads(params, flow, alpha, beta)?;
        let qs = params.dynamic_pressure * self.reference_area;
        Ok(AerodynamicPoint::from_loads(
            &loads,
            qs,
            params.mach,
            alpha,
            beta,
            params.skin_friction,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Panel;
    use crate::math::DEG_TO_RAD;

    fn flat_plate() -> Geometry {
        Geometry::init(
            vec![Panel::new(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            )],
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn incidence_is_complement_of_normal_angle() {
        let v = freestream_direction(0.0, 0.0);
        assert!((local_incidence(&v, &Vec3::new(1.0, 0.0, 0.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!(local_incidence(&v, &Vec3::new(0.0, 1.0, 0.0)).abs() < 1e-12);
        assert!((local_incidence(&v, &Vec3::new(-1.0, 0.0, 0.0)) + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn freestream_direction_is_unit() {
        let v = freestream_direction(0.3, -0.2);
        assert!((v.magnitude() - 1.0).abs() < 1e-12);
        assert!(v.y < 0.0);
    }

    #[test]
    fn plate_parallel_to_flow_carries_no_pressure_load() {
        let geometry = flat_plate();
        let flow = FreestreamState::sea_level();
        let params = FlowRegimeParameters::at_mach(5.0, &flow, &geometry).unwrap();
        for alpha_deg in [0.0, 5.0, 20.0] {
            let loads = geometry
                .panel_loads(&params, &flow, alpha_deg * DEG_TO_RAD, 0.0)
                .unwrap();
            assert!(loads.force.magnitude() < 1e-6);
        }
    }

    #[test]
    fn windward_panel_is_pushed_against_its_normal() {
        // Nose face with normal along +x faces the oncoming flow at alpha = 0.
        let nose = Panel::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let tail = Panel::new(
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, 1.0),
            Vec3::new(-2.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
        );
        let geometry = Geometry::init(vec![nose, tail], 0.5).unwrap();
        let flow = FreestreamState::sea_level();
        let params = FlowRegimeParameters::at_mach(4.0, &flow, &geometry).unwrap();
        let point = geometry.solve_point(&params, &flow, 0.0, 0.0).unwrap();

        // Stagnation on the nose plus base suction both add drag.
        assert!(point.fx > 0.0);
        assert!(point.cx > 0.0);
        assert!(point.fy.abs() < 1e-9);
        assert!(point.cxa > point.cx);
    }
}
