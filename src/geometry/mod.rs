pub mod panel;
pub mod mesh;
pub mod stl;

pub use panel::Panel;
pub use mesh::{Extents, Geometry, PanelData};
pub use stl::{parse_ascii_stl, read_stl, StlError};
