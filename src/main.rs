use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use facet_aero::aero::{AtmosphereProvider, StandardAtmosphere, TabulatedAtmosphere};
use facet_aero::logging::init_logging;
use facet_aero::report::write_report;
use facet_aero::{AdxRun, RunConfig};

/// Aerodynamic coefficient tables of a triangulated vehicle surface.
#[derive(Parser, Debug)]
#[command(name = "facet-aero", version, about)]
struct Cli {
    /// JSON run configuration.
    config: PathBuf,

    /// Directory the result folder is created in.
    #[arg(long, default_value = "results")]
    out: PathBuf,

    /// JSON atmosphere table (rows of altitude, pressure, temperature).
    /// The 1976 standard atmosphere is used when omitted.
    #[arg(long)]
    atmosphere: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config = RunConfig::from_json_file(&cli.config)?;
    let case = config.active_case()?.clone();
    log::info!("vehicle case {}: {}", config.active, case.vehicle.name);

    let atmosphere: Box<dyn AtmosphereProvider> = match &cli.atmosphere {
        Some(path) => Box::new(
            TabulatedAtmosphere::from_json_file(path)
                .with_context(|| format!("loading atmosphere table {}", path.display()))?,
        ),
        None => Box::new(StandardAtmosphere::new()),
    };

    let run = AdxRun::prepare(case)?;
    let output = run.execute(atmosphere.as_ref())?;
    let folder = write_report(&cli.out, &output)?;

    println!("{}", folder.display());
    Ok(())
}
