//! Local surface pressure relations.
//!
//! Every model returns `deltaP`, the local pressure rise over freestream
//! static pressure: `(p_local - p_inf) / p_inf`. A panel then carries the
//! force `deltaP * p_inf * area` along its inward normal.
//!
//! Incidence `nu` is the angle between the freestream and the panel plane:
//! +90° faces straight into the flow, 0 is grazing, negative is leeward.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::error::AeroError;

const BISECTION_ITERATIONS: usize = 100;
const ANGLE_TOLERANCE: f64 = 1e-12;

/// Attached-shock bounds at one Mach number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShockLimits {
    /// Shock wave angle at maximum deflection (rad).
    pub th_max: f64,
    /// Maximum wedge half-angle that keeps the shock attached (rad).
    pub nu_max: f64,
}

/// Flow deflection behind an oblique shock of wave angle `beta` (θ-β-M relation).
pub fn deflection_angle(mach: f64, k: f64, beta: f64) -> f64 {
    let m2 = mach * mach;
    let sin_b = beta.sin();
    let numerator = 2.0 * (m2 * sin_b * sin_b - 1.0) / beta.tan();
    let denominator = m2 * (k + (2.0 * beta).cos()) + 2.0;
    (numerator / denominator).atan()
}

/// Solves for the wave angle at which the attached-shock deflection peaks.
pub fn shock_limits(mach: f64, k: f64) -> Result<ShockLimits, AeroError> {
    if !(mach.is_finite() && mach > 1.0) {
        return Err(AeroError::Domain(format!(
            "attached shock requires supersonic Mach, got {}",
            mach
        )));
    }
    if !(k.is_finite() && k > 1.0) {
        return Err(AeroError::Domain(format!("adiabatic index must exceed 1, got {}", k)));
    }

    let m2 = mach * mach;
    let root = ((k + 1.0) * ((k + 1.0) * m2 * m2 + 8.0 * (k - 1.0) * m2 + 16.0)).sqrt();
    let sin2_beta = ((k + 1.0) * m2 - 4.0 + root) / (4.0 * k * m2);
    let th_max = sin2_beta.clamp(0.0, 1.0).sqrt().asin();

    Ok(ShockLimits {
        th_max,
        nu_max: deflection_angle(mach, k, th_max),
    })
}

/// Weak-branch wave angle for a deflection within the attached range.
fn weak_wave_angle(mach: f64, k: f64, deflection: f64, limits: &ShockLimits) -> f64 {
    let mach_angle = (1.0 / mach).asin();
    if deflection <= 0.0 {
        return mach_angle;
    }
    if deflection >= limits.nu_max {
        return limits.th_max;
    }

    let (mut lo, mut hi) = (mach_angle, limits.th_max);
    for _ in 0..BISECTION_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if deflection_angle(mach, k, mid) < deflection {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < ANGLE_TOLERANCE {
            break;
        }
    }
    0.5 * (lo + hi)
}

fn oblique_shock_delta_p(mach: f64, k: f64, beta: f64) -> f64 {
    let mn = mach * beta.sin();
    2.0 * k / (k + 1.0) * (mn * mn - 1.0)
}

/// Stagnation pressure behind a normal shock over freestream static (Rayleigh pitot).
pub fn pitot_pressure_ratio(mach: f64, k: f64) -> f64 {
    let m2 = mach * mach;
    let a = ((k + 1.0).powi(2) * m2 / (4.0 * k * m2 - 2.0 * (k - 1.0))).powf(k / (k - 1.0));
    a * (1.0 - k + 2.0 * k * m2) / (k + 1.0)
}

/// Prandtl-Meyer function ν(M) in radians.
pub fn prandtl_meyer(mach: f64, k: f64) -> f64 {
    let m2m1 = (mach * mach - 1.0).max(0.0);
    let g = ((k + 1.0) / (k - 1.0)).sqrt();
    g * (m2m1 / (g * g)).sqrt().atan() - m2m1.sqrt().atan()
}

/// Mach number reached after turning the flow by `turn` through an expansion fan.
///
/// Returns `None` past the vacuum limit.
fn expanded_mach(mach: f64, k: f64, turn: f64) -> Option<f64> {
    let target = prandtl_meyer(mach, k) + turn;
    let vacuum = FRAC_PI_2 * (((k + 1.0) / (k - 1.0)).sqrt() - 1.0);
    if target >= vacuum - ANGLE_TOLERANCE {
        return None;
    }

    let mut lo = mach;
    let mut hi = mach * 2.0;
    while prandtl_meyer(hi, k) < target {
        lo = hi;
        hi *= 2.0;
        if hi > 1e8 {
            return None;
        }
    }
    for _ in 0..BISECTION_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if prandtl_meyer(mid, k) < target {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < 1e-12 * hi {
            break;
        }
    }
    Some(0.5 * (lo + hi))
}

fn check_incidence(incidence: f64) -> Result<(), AeroError> {
    if !incidence.is_finite() || incidence.abs() > FRAC_PI_2 + ANGLE_TOLERANCE {
        return Err(AeroError::Domain(format!(
            "local incidence {:.6} rad outside [-pi/2, pi/2]",
            incidence
        )));
    }
    Ok(())
}

/// Continuum shock-expansion pressure with a Newtonian fallback past detachment.
///
/// * `0 <= nu <= nu_max`: weak attached oblique shock.
/// * `nu > nu_max`: sin² bridge from the attached-shock value at `nu_max` to
///   the normal-shock stagnation value at 90°.
/// * `nu < 0`: Prandtl-Meyer expansion by `|nu|`, floored at vacuum (`-1`).
pub fn continuum_delta_p(
    limits: &ShockLimits,
    incidence: f64,
    mach: f64,
    k: f64,
) -> Result<f64, AeroError> {
    check_incidence(incidence)?;
    let incidence = incidence.clamp(-FRAC_PI_2, FRAC_PI_2);

    if incidence < 0.0 {
        let dp = match expanded_mach(mach, k, -incidence) {
            Some(m2) => {
                let e = (k - 1.0) / 2.0;
                ((1.0 + e * mach * mach) / (1.0 + e * m2 * m2)).powf(k / (k - 1.0)) - 1.0
            }
            None => -1.0,
        };
        return Ok(dp);
    }

    if incidence <= limits.nu_max {
        let beta = weak_wave_angle(mach, k, incidence, limits);
        return Ok(oblique_shock_delta_p(mach, k, beta));
    }

    let attached = oblique_shock_delta_p(mach, k, limits.th_max);
    let stagnation = pitot_pressure_ratio(mach, k) - 1.0;
    let s2_max = limits.nu_max.sin().powi(2);
    let s2 = incidence.sin().powi(2);
    Ok(attached + (stagnation - attached) * (s2 - s2_max) / (1.0 - s2_max))
}

/// Free-molecular flat-plate pressure (diffuse reflection, full accommodation,
/// wall at freestream temperature).
pub fn free_molecular_delta_p(
    incidence: f64,
    mach: f64,
    k: f64,
    sound_speed: f64,
    thermal_speed: f64,
) -> Result<f64, AeroError> {
    check_incidence(incidence)?;
    if !(mach > 0.0 && sound_speed > 0.0 && thermal_speed > 0.0) {
        return Err(AeroError::Domain(format!(
            "free-molecular model needs positive Mach and speeds (M={}, a={}, c={})",
            mach, sound_speed, thermal_speed
        )));
    }

    let s = mach * sound_speed / thermal_speed;
    let x = s * incidence.sin();
    let sqrt_pi = PI.sqrt();
    let reflected = (x / sqrt_pi + 0.5) * (-x * x).exp();
    let incident = (x * x + 0.5 + 0.5 * sqrt_pi * x) * one_plus_erf(x);
    let cp = (reflected + incident) / (s * s);

    Ok(cp * 0.5 * k * mach * mach - 1.0)
}

/// Complementary error function for `x >= 0` (Abramowitz & Stegun 7.1.26).
fn erfc_nonneg(x: f64) -> f64 {
    const P: f64 = 0.327_591_1;
    const A: [f64; 5] = [
        0.254_829_592,
        -0.284_496_736,
        1.421_413_741,
        -1.453_152_027,
        1.061_405_429,
    ];
    if x == 0.0 {
        return 1.0;
    }
    let t = 1.0 / (1.0 + P * x);
    let poly = t * (A[0] + t * (A[1] + t * (A[2] + t * (A[3] + t * A[4]))));
    poly * (-x * x).exp()
}

pub fn erf(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 - erfc_nonneg(x)
    } else {
        erfc_nonneg(-x) - 1.0
    }
}

/// `1 + erf(x)` without cancellation for negative `x`.
fn one_plus_erf(x: f64) -> f64 {
    if x >= 0.0 {
        2.0 - erfc_nonneg(x)
    } else {
        erfc_nonneg(-x)
    }
}
