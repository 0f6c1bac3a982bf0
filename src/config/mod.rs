pub mod sweep;
pub mod vehicle;
pub mod run_config;

pub use sweep::SweepConfig;
pub use vehicle::{VehicleCase, VehicleConfig};
pub use run_config::RunConfig;
