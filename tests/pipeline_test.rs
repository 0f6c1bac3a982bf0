use std::fs;
use std::path::Path;

use chrono::{Local, TimeZone};
use facet_aero::aero::{AtmosphereRow, TabulatedAtmosphere};
use facet_aero::report::{write_report_at, COEFFICIENTS};
use facet_aero::{AdxRun, RunConfig};

const TETRAHEDRON_STL: &str = "solid tetra
  facet normal 0 0 0
    outer loop
      vertex 0 0 0
      vertex 0 1000 0
      vertex 1000 0 0
    endloop
  endfacet
  facet normal 0 0 0
    outer loop
      vertex 0 0 0
      vertex 1000 0 0
      vertex 0 0 1000
    endloop
  endfacet
  facet normal 0 0 0
    outer loop
      vertex 0 0 0
      vertex 0 0 1000
      vertex 0 1000 0
    endloop
  endfacet
  facet normal 0 0 0
    outer loop
      vertex 1000 0 0
      vertex 0 1000 0
      vertex 0 0 1000
    endloop
  endfacet
endsolid tetra
";

fn write_inputs(dir: &Path) -> std::path::PathBuf {
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(dir.join("data/tetra.stl"), TETRAHEDRON_STL).unwrap();

    let config = r#"{
        "active": 0,
        "vehicles": [
            {
                "vehicle": {
                    "name": "tetra",
                    "mesh_path": "data/tetra.stl",
                    "reference_area": 0.5,
                    "mesh_scale": 0.001
                },
                "flight": {
                    "altitude": 30000.0,
                    "mach": [3.0, 7.5],
                    "alpha": [0.0, 10.0, 20.0]
                }
            }
        ]
    }"#;
    let path = dir.join("run.json");
    fs::write(&path, config).unwrap();
    path
}

#[test]
fn config_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_inputs(dir.path());

    let config = RunConfig::from_json_file(&config_path).unwrap();
    let run = AdxRun::prepare(config.active_case().unwrap().clone()).unwrap();
    assert_eq!(run.geometry.n_panels(), 4);
    assert!((run.geometry.size() - 1.0).abs() < 1e-12);

    let atmosphere = TabulatedAtmosphere::new(vec![
        AtmosphereRow { altitude: 0.0, pressure: 101_325.0, temperature: 288.15 },
        AtmosphereRow { altitude: 50_000.0, pressure: 79.78, temperature: 270.65 },
    ])
    .unwrap();
    let output = run.execute(&atmosphere).unwrap();
    assert_eq!(output.sweep.table.n_mach(), 2);
    assert_eq!(output.sweep.table.n_alpha(), 3);

    let stamp = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 0).unwrap();
    let out = dir.path().join("results");
    let folder = write_report_at(&out, &output, &stamp).unwrap();
    assert_eq!(folder, out.join("tetra_2025-01-02_03.04"));

    for mach in ["M3", "M7.5"] {
        for name in COEFFICIENTS {
            let text = fs::read_to_string(folder.join(mach).join(format!("{}.txt", name))).unwrap();
            let header = format!("name: {name}\ntype: 2D\nx: alpha | deg\ny: {name}  | \n\ncoords:\n");
            assert!(text.starts_with(&header), "{}", text);
            let lines: Vec<&str> = text[header.len()..].lines().collect();
            assert_eq!(lines.len(), 3);
            assert!(lines[0].starts_with("0 -> "));
            assert!(lines[1].starts_with("10 -> "));
            assert!(lines[2].starts_with("20 -> "));
        }
    }

    let res = fs::read_to_string(folder.join("res.txt")).unwrap();
    assert!(res.contains("tetra.stl"));
    assert!(res.contains("\tlength: 1 m"));
    assert!(res.contains("\tSmid:  0.5 m2"));
    assert!(res.contains("H:   30000 m"));
    assert!(res.contains("Mach: 3\t7.5"));
    assert!(res.contains("Re:   "));
    assert!(res.contains("Kn:   "));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(folder.join("adx.json")).unwrap()).unwrap();
    assert_eq!(json["vehicle"]["name"], "tetra");
    assert_eq!(json["sweep"]["table"]["rows"].as_array().unwrap().len(), 2);
    assert_eq!(json["sweep"]["parameters"].as_array().unwrap().len(), 2);
}

#[test]
fn repeated_mach_does_not_overwrite_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig::from_json_file(&write_inputs(dir.path())).unwrap();
    let mut case = config.active_case().unwrap().clone();
    case.flight.mach = vec![3.0, 3.0];

    let panels = facet_aero::geometry::read_stl(&case.vehicle.mesh_path, case.vehicle.mesh_scale)
        .unwrap();
    let output = AdxRun::from_panels(case, panels)
        .unwrap()
        .execute(&facet_aero::StandardAtmosphere::new())
        .unwrap();
    assert_eq!(output.sweep.table.n_mach(), 2);

    let out = dir.path().join("results");
    let err = write_report_at(&out, &output, &Local::now()).unwrap_err();
    assert!(err.to_string().contains("Mach 3"));
    assert!(!out.exists());
}

#[test]
fn invalid_config_is_rejected_before_meshing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    fs::write(
        &path,
        r#"{ "vehicles": [ { "vehicle": { "name": "x", "mesh_path": "x.stl", "reference_area": 1.0 },
                             "flight": { "altitude": 0.0, "mach": [0.7] } } ] }"#,
    )
    .unwrap();
    let err = RunConfig::from_json_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Mach 0.7"));
}
