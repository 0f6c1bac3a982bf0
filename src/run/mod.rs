pub mod adx_run;

pub use adx_run::{AdxRun, GeometrySummary, RunOutput};
