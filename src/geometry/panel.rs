use serde::{Deserialize, Serialize};

use crate::math::{triangle_area, triangle_centroid, Vec3};

/// Triangular surface element with an outward unit normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
    pub normal: Vec3,
}

impl Panel {
    pub fn new(p1: Vec3, p2: Vec3, p3: Vec3, normal: Vec3) -> Self {
        Self {
            p1,
            p2,
            p3,
            normal: normal.normalize(),
        }
    }

    /// Panel whose normal follows the right-hand rule on (p1, p2, p3).
    pub fn from_vertices(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let normal = (p2 - p1).cross(&(p3 - p1));
        Self::new(p1, p2, p3, normal)
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.p1, self.p2, self.p3]
    }

    pub fn area(&self) -> f64 {
        triangle_area(&self.p1, &self.p2, &self.p3)
    }

    pub fn centroid(&self) -> Vec3 {
        triangle_centroid(&self.p1, &self.p2, &self.p3)
    }

    pub fn is_finite(&self) -> bool {
        self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite() && self.normal.is_finite()
    }

    /// Projection onto the plane orthogonal to `axis`.
    ///
    /// Returns `None` when two projected vertices share a coordinate on one
    /// of the remaining axes, which is how edge-on panels are excluded from
    /// the projected-area centroid.
    pub fn project_out(&self, axis: usize) -> Option<[Vec3; 3]> {
        let pp1 = self.p1.without_axis(axis);
        let pp2 = self.p2.without_axis(axis);
        let pp3 = self.p3.without_axis(axis);

        for n in (0..3).filter(|&n| n != axis) {
            let (a, b, c) = (pp1.axis(n), pp2.axis(n), pp3.axis(n));
            if a == b || a == c || b == c {
                return None;
            }
        }
        Some([pp1, pp2, pp3])
    }
}
