//! Log Loading Integration Tests
//!
//! Writes LAS and CSV files to a temp directory, loads them through
//! `logs::load_log`, resolves curves, and pushes them through the
//! pipeline.

use std::fmt::Write as _;
use std::path::PathBuf;

use wellgeo::config::EngineConfig;
use wellgeo::curves::{resolve_canonical, CanonicalCurve, ResolvedCurves};
use wellgeo::logs::{load_log, LogReadError};
use wellgeo::pipeline::{compute_products, Availability};
use wellgeo::DensitySource;

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// LAS 2.0 file with DEPT, DT, RHOB, DEVI, HAZI over `rows` half-foot steps.
fn las_text(rows: usize) -> String {
    let mut text = String::from(
        "~VERSION INFORMATION
 VERS.                 2.0 :   CWLS LOG ASCII STANDARD - VERSION 2.0
 WRAP.                  NO :   ONE LINE PER DEPTH STEP
~WELL INFORMATION
 STRT.FT            2000.0 :
 STEP.FT               0.5 :
 NULL.             -999.25 :
 COMP.           ACME OIL  : COMPANY
 WELL.          TIE-TEST-1 : WELL
 FLD .         NORTH BASIN : FIELD
 SRVC.         WIRELINE CO : SERVICE COMPANY
 LOC .    58.44N 1.89E     : LOCATION
~CURVE INFORMATION
 DEPT.FT                   : DEPTH
 DT  .US/F                 : SONIC
 RHOB.G/C3                 : BULK DENSITY
 DEVI.DEG                  : INCLINATION
 HAZI.DEG                  : AZIMUTH
~A
",
    );
    for i in 0..rows {
        let depth = 2000.0 + i as f64 * 0.5;
        let dt = if (i / 50) % 2 == 0 { 92.0 } else { 68.0 };
        let rhob = if i % 97 == 13 { "-999.25".to_string() } else { format!("{:.3}", 2.3 + (i % 5) as f64 * 0.05) };
        let devi = (i as f64 * 0.02).min(30.0);
        writeln!(text, "{depth:.1} {dt:.2} {rhob} {devi:.3} 45.0").unwrap();
    }
    text
}

#[test]
fn las_file_loads_with_header_and_units() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "tie_test.las", &las_text(300));

    let set = load_log(&path).unwrap();
    assert_eq!(set.header.name, "TIE-TEST-1");
    assert_eq!(set.header.field, "NORTH BASIN");
    assert_eq!(set.header.service_company, "WIRELINE CO");
    assert_eq!(set.header.location, "58.44N 1.89E");
    assert_eq!(set.len(), 5);

    let dt = set.get("DT").unwrap();
    assert_eq!(dt.unit, "US/F");
    assert_eq!(dt.len(), 300);

    let rhob = set.get("RHOB").unwrap();
    assert!(rhob.samples[13].value.is_nan());
}

#[test]
fn las_aliases_resolve_to_canonical_curves() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "aliases.LAS", &las_text(50));
    let set = load_log(&path).unwrap();

    let aliases = EngineConfig::default().curves;
    let resolved = ResolvedCurves::resolve(&set, &aliases);
    assert_eq!(resolved.inclination.mnemonic, "DEVI");
    assert_eq!(resolved.azimuth.mnemonic, "HAZI");
    assert_eq!(resolved.depth.mnemonic, "DEPT");
    assert!(resolved.has_survey());
    assert!(resolved.gamma_ray.is_empty());

    // Canonical name and alias return the same data
    let by_alias = wellgeo::resolve(&set, &["hazi"]);
    let by_canonical = resolve_canonical(&set, CanonicalCurve::Azimuth, &aliases);
    assert_eq!(by_alias, by_canonical);
}

#[test]
fn las_through_pipeline_produces_both_products() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "full.las", &las_text(600));
    let set = load_log(&path).unwrap();

    let mut config = EngineConfig::default();
    config.section.seed = Some(2024);
    let products = compute_products(&set, &config);

    assert_eq!(products.well.name, "TIE-TEST-1");
    assert_eq!(products.curves_used.get("INC").map(String::as_str), Some("DEVI"));

    let Availability::Available(traj) = &products.trajectory else {
        panic!("trajectory should be available");
    };
    assert!(!traj.trajectory.synthetic);
    assert_eq!(traj.trajectory.len(), 600);

    let Availability::Available(seis) = &products.seismic else {
        panic!("seismic should be available");
    };
    assert_eq!(seis.trace.len(), 600);
    // Null RHOB samples fell back to Gardner individually
    assert_eq!(seis.summary.density_source, DensitySource::Mixed);
    assert_eq!(
        seis.impedance.iter().filter(|s| s.density_estimated).count(),
        (0..600).filter(|i| i % 97 == 13).count()
    );
}

#[test]
fn csv_file_loads_and_falls_back_to_synthetic_trajectory() {
    let dir = tempfile::tempdir().unwrap();
    let mut text = String::from("DEPTH(ft),GR(api),DTC(us/ft)\n");
    for i in 0..200 {
        let depth = 1500.0 + f64::from(i);
        let dt = if i == 50 { String::new() } else { format!("{}", 80.0 + f64::from(i % 7)) };
        writeln!(text, "{depth},{},{dt}", 40 + i % 30).unwrap();
    }
    let path = write_file(&dir, "offset-well.csv", &text);

    let set = load_log(&path).unwrap();
    // CSV carries no header block; the file stem names the well
    assert_eq!(set.header.name, "offset-well");
    assert_eq!(set.get("DTC").unwrap().unit, "us/ft");

    let mut config = EngineConfig::default();
    config.section.seed = Some(1);
    let products = compute_products(&set, &config);

    let Availability::Available(traj) = &products.trajectory else {
        panic!("trajectory should fall back to synthetic");
    };
    assert!(traj.trajectory.synthetic);

    let Availability::Available(seis) = &products.seismic else {
        panic!("seismic should be available");
    };
    assert_eq!(seis.impedance.len(), 199);
    assert_eq!(seis.summary.density_source, DensitySource::Estimated);
}

#[test]
fn unreadable_and_malformed_files_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_log(&dir.path().join("missing.las")).unwrap_err();
    assert!(matches!(err, LogReadError::Io { .. }));
    assert!(err.to_string().contains("missing.las"));

    let path = write_file(&dir, "broken.las", "~V\n VERS. 2.0 :\n~C\n DEPT.FT :\n DT.US/F :\n~A\n1.0 abc\n");
    assert!(matches!(load_log(&path), Err(LogReadError::InvalidNumber { .. })));

    let path = write_file(&dir, "nocurves.las", "~V\n VERS. 2.0 :\n");
    assert!(matches!(load_log(&path), Err(LogReadError::MissingSection(_))));
}
