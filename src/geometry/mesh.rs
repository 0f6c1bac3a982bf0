//! Geometry snapshot derived once from the panel set.

use serde::{Deserialize, Serialize};

use crate::error::AeroError;
use crate::geometry::Panel;
use crate::math::{triangle_area, Vec3};

/// Per-panel quantities the solver reuses at every sweep cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PanelData {
    pub area: f64,
    pub centroid: Vec3,
    pub normal: Vec3,
}

/// Bounding-box extents of the vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    /// Length along x.
    pub size: f64,
    /// Extent along y.
    pub height: f64,
    /// Extent along z.
    pub width: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub panels: Vec<Panel>,
    pub reference_area: f64,
    pub wetted_area: f64,
    pub extents: Extents,
    /// Projected-area-weighted surface centroid, body axes.
    pub surface_centroid: Vec3,
    /// Largest x of the mesh; stations are measured back from here.
    pub nose_x: f64,
    /// Surface centroid station measured from the nose (nose_x - centroid.x).
    pub xcs: f64,
    /// Surface centroid vertical offset (centroid.z).
    pub ycs: f64,
    panel_data: Vec<PanelData>,
}

impl Geometry {
    /// Builds the snapshot in a single pass over the panels.
    pub fn init(panels: Vec<Panel>, reference_area: f64) -> Result<Self, AeroError> {
        if panels.is_empty() {
            return Err(AeroError::EmptyGeometry);
        }
        if !reference_area.is_finite() || reference_area <= 0.0 {
            return Err(AeroError::InvalidReferenceArea(reference_area));
        }

        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        let mut wetted_area = 0.0;
        let mut center_sum = [0.0; 3];
        let mut projected_sum = [0.0; 3];
        let mut panel_data = Vec::with_capacity(panels.len());

        for (i, panel) in panels.iter().enumerate() {
            if !panel.is_finite() {
                return Err(AeroError::NonFinitePanel(i));
            }

            let area = panel.area();
            let centroid = panel.centroid();

            for k in 0..3 {
                if let Some([pp1, pp2, pp3]) = panel.project_out(k) {
                    let projected = triangle_area(&pp1, &pp2, &pp3);
                    center_sum[k] += projected * centroid.axis(k);
                    projected_sum[k] += projected;
                }
            }

            for p in panel.vertices() {
                for k in 0..3 {
                    min[k] = min[k].min(p.axis(k));
                    max[k] = max[k].max(p.axis(k));
                }
            }

            wetted_area += area;
            panel_data.push(PanelData {
                area,
                centroid,
                normal: panel.normal,
            });
        }

        if wetted_area <= 0.0 {
            return Err(AeroError::ZeroWettedArea);
        }

        let mut center = [0.0; 3];
        for k in 0..3 {
            // No projected area on an axis carries no information: fall back to 0.
            if projected_sum[k] > 0.0 {
                center[k] = center_sum[k] / projected_sum[k];
            }
        }
        let surface_centroid = Vec3::from_array(center);

        let extents = Extents {
            size: max[0] - min[0],
            height: max[1] - min[1],
            width: max[2] - min[2],
        };

        log::debug!(
            "geometry: {} panels, wetted area {:.4} m2, size {:.4} x {:.4} x {:.4} m",
            panels.len(),
            wetted_area,
            extents.size,
            extents.height,
            extents.width
        );

        Ok(Self {
            nose_x: max[0],
            xcs: max[0] - surface_centroid.x,
            ycs: surface_centroid.z,
            panels,
            reference_area,
            wetted_area,
            extents,
            surface_centroid,
            panel_data,
        })
    }

    pub fn n_panels(&self) -> usize {
        self.panels.len()
    }

    /// Characteristic length used for the Reynolds number.
    pub fn size(&self) -> f64 {
        self.extents.size
    }

    pub fn panel_data(&self) -> &[PanelData] {
        &self.panel_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_right_triangle() -> Panel {
        Panel::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn empty_panel_set_is_rejected() {
        assert_eq!(Geometry::init(vec![], 1.0).unwrap_err(), AeroError::EmptyGeometry);
    }

    #[test]
    fn degenerate_panels_have_zero_wetted_area() {
        let sliver = Panel::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert_eq!(Geometry::init(vec![sliver], 1.0).unwrap_err(), AeroError::ZeroWettedArea);
    }

    #[test]
    fn rejects_bad_reference_area() {
        let err = Geometry::init(vec![unit_right_triangle()], 0.0).unwrap_err();
        assert!(err.is_geometry());
    }

    #[test]
    fn single_panel_extents_and_area() {
        let geometry = Geometry::init(vec![unit_right_triangle()], 1.0).unwrap();
        assert!((geometry.wetted_area - 0.5).abs() < 1e-12);
        assert!((geometry.extents.size - 1.0).abs() < 1e-12);
        assert!((geometry.extents.height - 1.0).abs() < 1e-12);
        assert_eq!(geometry.extents.width, 0.0);
        // Every projection of this panel is degenerate, so the centroid falls back to 0.
        assert_eq!(geometry.surface_centroid, Vec3::zero());
        assert!((geometry.xcs - 1.0).abs() < 1e-12);
        assert_eq!(geometry.ycs, 0.0);
    }

    #[test]
    fn projected_centroid_of_skewed_panel() {
        let panel = Panel::from_vertices(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 1.0, 0.5),
            Vec3::new(2.0, 3.0, 2.5),
        );
        let geometry = Geometry::init(vec![panel], 2.0).unwrap();
        let c = panel.centroid();
        // A single panel weights its own centroid on every axis.
        assert!((geometry.surface_centroid.x - c.x).abs() < 1e-12);
        assert!((geometry.surface_centroid.z - c.z).abs() < 1e-12);
        assert!((geometry.xcs - (4.0 - c.x)).abs() < 1e-12);
    }

    #[test]
    fn centroid_station_survives_translation() {
        let skewed = |dx: f64| {
            Panel::from_vertices(
                Vec3::new(dx, 0.0, 0.0),
                Vec3::new(4.0 + dx, 1.0, 0.5),
                Vec3::new(2.0 + dx, 3.0, 2.5),
            )
        };
        let at_origin = Geometry::init(vec![skewed(0.0)], 2.0).unwrap();
        for dx in [1.0, -7.5, 120.0] {
            let shifted = Geometry::init(vec![skewed(dx)], 2.0).unwrap();
            assert!((shifted.size() - at_origin.size()).abs() < 1e-9);
            assert!((shifted.nose_x - (4.0 + dx)).abs() < 1e-9);
            assert!((shifted.xcs - at_origin.xcs).abs() < 1e-9);
            assert!((shifted.ycs - at_origin.ycs).abs() < 1e-9);
        }
    }
}
