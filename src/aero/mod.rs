pub mod atmosphere;
pub mod gas_dynamics;
pub mod regime;
pub mod airdata;
pub mod forces;

pub use atmosphere::{
    AtmosphereProvider, AtmosphereRow, FreestreamState, StandardAtmosphere, TabulatedAtmosphere,
};
pub use gas_dynamics::{continuum_delta_p, free_molecular_delta_p, shock_limits, ShockLimits};
pub use regime::FlowRegime;
pub use airdata::{compute_dynamic_pressure, FlowRegimeParameters};
pub use forces::{AerodynamicPoint, CenterOfPressure, PanelLoads};
