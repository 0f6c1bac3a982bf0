//! Triangle and vector primitives used by the panel integrator.

use super::Vec3;

/// Arithmetic mean of the three vertices.
pub fn triangle_centroid(p1: &Vec3, p2: &Vec3, p3: &Vec3) -> Vec3 {
    (*p1 + *p2 + *p3) * (1.0 / 3.0)
}

/// Heron's formula on the three edge lengths.
///
/// Collinear or coincident vertices give 0.0; the radicand is clamped so
/// rounding never produces a NaN.
pub fn triangle_area(p1: &Vec3, p2: &Vec3, p3: &Vec3) -> f64 {
    let a = p1.distance(p2);
    let b = p2.distance(p3);
    let c = p3.distance(p1);
    let s = 0.5 * (a + b + c);
    let radicand = s * (s - a) * (s - b) * (s - c);
    if radicand > 0.0 {
        radicand.sqrt()
    } else {
        0.0
    }
}

/// Angle between two vectors in radians, in [0, π].
///
/// The normalised dot product is clamped to [-1, 1] before `acos`. A
/// zero-length input yields π/2.
pub fn angle_between(a: &Vec3, b: &Vec3) -> f64 {
    let denom = a.magnitude() * b.magnitude();
    if denom <= f64::MIN_POSITIVE {
        return std::f64::consts::FRAC_PI_2;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}
