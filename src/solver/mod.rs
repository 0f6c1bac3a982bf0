pub mod single_point;
pub mod center_of_pressure;
pub mod sweep;

pub use single_point::{freestream_direction, local_incidence};
pub use center_of_pressure::{center_of_pressure, CENTER_OF_PRESSURE_STEP};
pub use sweep::{AdxTable, CellFailure, FailureStage, SweepResult};
