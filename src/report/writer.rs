//! Plain-text coefficient files plus a JSON dump of the full result.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::{DateTime, Local};

use crate::aero::AerodynamicPoint;
use crate::run::RunOutput;

/// Coefficients written as one `<name>.txt` file per Mach folder.
pub const COEFFICIENTS: [&str; 9] = [
    "X_force", "Y_force", "Cx", "Cy", "Cxa", "Cya", "K", "Xcd", "Ycd",
];

fn coefficient(point: &AerodynamicPoint, name: &str) -> f64 {
    let cop = point.center_of_pressure;
    match name {
        "X_force" => point.fx,
        "Y_force" => point.fy,
        "Cx" => point.cx,
        "Cy" => point.cy,
        "Cxa" => point.cxa,
        "Cya" => point.cya,
        "K" => point.k,
        "Xcd" => cop.map_or(f64::NAN, |c| c.xcd),
        "Ycd" => cop.map_or(f64::NAN, |c| c.ycd),
        _ => f64::NAN,
    }
}

/// Angles in degrees without the noise of the rad -> deg round trip.
fn format_angle(deg: f64) -> String {
    format!("{}", (deg * 1e9).round() / 1e9)
}

fn result_folder_name(vehicle: &str, stamp: &DateTime<Local>) -> String {
    format!("{}_{}", vehicle, stamp.format("%Y-%m-%d_%H.%M"))
}

/// Writes the report under `out_dir`, stamped with the current local time.
pub fn write_report(out_dir: &Path, output: &RunOutput) -> anyhow::Result<PathBuf> {
    write_report_at(out_dir, output, &Local::now())
}

/// Writes the report into `<out_dir>/<vehicle>_<YYYY-MM-DD_HH.MM>/` and
/// returns that folder.
pub fn write_report_at(
    out_dir: &Path,
    output: &RunOutput,
    stamp: &DateTime<Local>,
) -> anyhow::Result<PathBuf> {
    let parameters = &output.sweep.parameters;
    for (i, params) in parameters.iter().enumerate() {
        if parameters[..i].iter().any(|p| p.mach == params.mach) {
            bail!("Mach {} appears twice; its report folders would collide", params.mach);
        }
    }

    let folder = out_dir.join(result_folder_name(&output.vehicle.name, stamp));
    fs::create_dir_all(&folder)
        .with_context(|| format!("creating report folder {}", folder.display()))?;

    for (row, params) in output.sweep.table.rows.iter().zip(&output.sweep.parameters) {
        let mach_dir = folder.join(format!("M{}", params.mach));
        fs::create_dir_all(&mach_dir)?;
        for name in COEFFICIENTS {
            write_coefficient_file(&mach_dir.join(format!("{}.txt", name)), name, row)?;
        }
    }

    write_summary(&folder.join("res.txt"), output)?;

    let json = File::create(folder.join("adx.json"))?;
    serde_json::to_writer_pretty(BufWriter::new(json), output)
        .context("writing adx.json")?;

    log::info!("aerodynamic data written to {}", folder.display());
    Ok(folder)
}

fn write_coefficient_file(path: &Path, name: &str, row: &[AerodynamicPoint]) -> anyhow::Result<()> {
    let mut file = BufWriter::new(
        File::create(path).with_context(|| format!("creating {}", path.display()))?,
    );
    write!(
        file,
        "name: {name}\ntype: 2D\nx: alpha | deg\ny: {name}  | \n\ncoords:\n"
    )?;
    for point in row {
        writeln!(
            file,
            "{} -> {}",
            format_angle(point.alpha_deg()),
            coefficient(point, name)
        )?;
    }
    file.flush()?;
    Ok(())
}

fn write_summary(path: &Path, output: &RunOutput) -> anyhow::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    let extents = output.geometry.extents;
    let join = |values: Vec<String>| values.join("\t");
    let parameters = &output.sweep.parameters;

    writeln!(file, "Model : \"{}\"\n\n", output.vehicle.mesh_path.display())?;
    writeln!(file, "geometry:")?;
    writeln!(file, "\tlength: {} m", extents.size)?;
    writeln!(file, "\theight: {} m", extents.height)?;
    writeln!(file, "\twidth:  {} m", extents.width)?;
    writeln!(file, "\tSmid:  {} m2", output.geometry.reference_area)?;
    writeln!(file)?;
    writeln!(file, "H:   {} m", output.flight.altitude)?;
    writeln!(
        file,
        "Mach: {}",
        join(parameters.iter().map(|p| p.mach.to_string()).collect())
    )?;
    writeln!(
        file,
        "Re:   {}",
        join(parameters.iter().map(|p| p.reynolds.to_string()).collect())
    )?;
    writeln!(
        file,
        "Kn:   {}",
        join(parameters.iter().map(|p| p.knudsen.to_string()).collect())
    )?;
    file.flush()?;
    Ok(())
}
