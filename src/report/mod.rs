pub mod writer;

pub use writer::{write_report, write_report_at, COEFFICIENTS};
