pub mod vector;
pub mod primitives;
pub mod linalg;

pub use vector::Vec3;
pub use primitives::{angle_between, triangle_area, triangle_centroid};
pub use linalg::{solve_2x2, SINGULAR_EPSILON};

pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
