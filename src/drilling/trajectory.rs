//! Trajectory integration from survey stations
//!
//! Two station sources, kept apart at the output boundary:
//! - Survey: measured inclination/azimuth curves
//! - Synthetic: a build-and-hold profile fabricated from depth alone,
//!   flagged `synthetic = true` so it is never shown as measured data
//!
//! Positions accumulate from a tie-in point directly below the surface
//! location at the first station's measured depth (the hole is taken as
//! vertical above the first station).

use tracing::{debug, warn};

use crate::config::defaults::{DLS_REFERENCE_LENGTH, MIN_CURVATURE_EPSILON};
use crate::config::{RiskThresholds, SyntheticProfileConfig, TrajectoryConfig};
use crate::error::GeoError;
use crate::types::{
    LogCurve, Position, ProjectionMethod, SurveyStation, Trajectory, TrajectoryMode,
    TrajectoryPoint,
};

use super::dog_leg::{dog_leg_angle, station_dls};

const DEPTH_MATCH_TOLERANCE: f64 = 1e-6;

// ============================================================================
// Station Sources
// ============================================================================

/// Pair inclination and azimuth curves into survey stations.
///
/// Curves are zipped by index; the shorter one bounds the station count.
/// Samples where either value is missing are skipped. Both curves must
/// sit on the same depth index.
pub fn stations_from_curves(
    inclination: &LogCurve,
    azimuth: &LogCurve,
) -> Result<Vec<SurveyStation>, GeoError> {
    let mut stations = Vec::with_capacity(inclination.len().min(azimuth.len()));
    let mut skipped = 0usize;

    for (index, (inc, azi)) in inclination.samples.iter().zip(&azimuth.samples).enumerate() {
        if (inc.depth - azi.depth).abs() > DEPTH_MATCH_TOLERANCE {
            return Err(GeoError::CurveMisaligned {
                curve: azimuth.mnemonic.clone(),
                index,
                expected_depth: inc.depth,
                found_depth: azi.depth,
            });
        }
        if !inc.is_valid() || !azi.is_valid() {
            skipped += 1;
            continue;
        }
        let station = SurveyStation::new(inc.depth, inc.value, azi.value).map_err(|e| match e {
            GeoError::InvalidStation { reason, .. } => GeoError::InvalidStation { index, reason },
            other => other,
        })?;
        stations.push(station);
    }

    if skipped > 0 {
        warn!(skipped, kept = stations.len(), "Skipped survey samples with missing inclination/azimuth");
    }
    Ok(stations)
}

/// Fabricate a build-and-hold profile over a measured-depth series.
///
/// Inclination is zero down to the kick-off point (a fraction of the logged
/// interval), then builds at a fixed rate until it reaches the hold angle.
/// Azimuth is constant. Missing or non-increasing depths are dropped.
pub fn synthesize_stations(depths: &[f64], profile: &SyntheticProfileConfig) -> Vec<SurveyStation> {
    let mut md: Vec<f64> = Vec::with_capacity(depths.len());
    for &d in depths {
        if !d.is_finite() {
            continue;
        }
        if md.last().map_or(true, |&last| d > last) {
            md.push(d);
        }
    }
    let dropped = depths.len() - md.len();
    if dropped > 0 {
        debug!(dropped, "Dropped missing or non-increasing depths from synthetic profile");
    }

    let (Some(&top), Some(&bottom)) = (md.first(), md.last()) else {
        return Vec::new();
    };
    let kickoff = top + profile.kickoff_fraction * (bottom - top);
    let azimuth = profile.azimuth_deg.rem_euclid(360.0);

    md.into_iter()
        .map(|depth| {
            let built = profile.build_rate_deg_per_100 * (depth - kickoff) / DLS_REFERENCE_LENGTH;
            SurveyStation {
                measured_depth: depth,
                inclination_deg: built.clamp(0.0, profile.max_inclination_deg),
                azimuth_deg: azimuth,
            }
        })
        .collect()
}

// ============================================================================
// Subsampling
// ============================================================================

/// Indices of every `stride`-th station, always including the first and last.
pub fn subsample_indices(len: usize, stride: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let stride = stride.max(1);
    let mut indices: Vec<usize> = (0..len).step_by(stride).collect();
    if indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}

// ============================================================================
// Projection
// ============================================================================

/// Cartesian increment (north, east, tvd) over one course length.
fn project(upper: &SurveyStation, lower: &SurveyStation, method: ProjectionMethod) -> Position {
    let course = lower.measured_depth - upper.measured_depth;
    let i2 = lower.inclination_deg.to_radians();
    let a2 = lower.azimuth_deg.to_radians();

    match method {
        ProjectionMethod::Tangential => {
            let horizontal = course * i2.sin();
            Position {
                north: horizontal * a2.cos(),
                east: horizontal * a2.sin(),
                tvd: course * i2.cos(),
            }
        }
        ProjectionMethod::MinimumCurvature => {
            let i1 = upper.inclination_deg.to_radians();
            let a1 = upper.azimuth_deg.to_radians();
            let beta = dog_leg_angle(
                upper.inclination_deg,
                upper.azimuth_deg,
                lower.inclination_deg,
                lower.azimuth_deg,
            );
            let ratio_factor = if beta < MIN_CURVATURE_EPSILON {
                1.0
            } else {
                2.0 / beta * (beta / 2.0).tan()
            };
            let half = course / 2.0 * ratio_factor;
            Position {
                north: half * (i1.sin() * a1.cos() + i2.sin() * a2.cos()),
                east: half * (i1.sin() * a1.sin() + i2.sin() * a2.sin()),
                tvd: half * (i1.cos() + i2.cos()),
            }
        }
    }
}

fn check_stations(stations: &[SurveyStation]) -> Result<(), GeoError> {
    for (index, s) in stations.iter().enumerate() {
        if !s.measured_depth.is_finite() || !s.inclination_deg.is_finite() || !s.azimuth_deg.is_finite() {
            return Err(GeoError::InvalidStation {
                index,
                reason: "non-finite measured depth, inclination, or azimuth".to_string(),
            });
        }
        if !(0.0..=180.0).contains(&s.inclination_deg) {
            return Err(GeoError::InvalidStation {
                index,
                reason: format!("inclination {:.2} outside [0, 180]", s.inclination_deg),
            });
        }
        if !(0.0..360.0).contains(&s.azimuth_deg) {
            return Err(GeoError::InvalidStation {
                index,
                reason: format!("azimuth {:.2} outside [0, 360)", s.azimuth_deg),
            });
        }
        if index > 0 && s.measured_depth <= stations[index - 1].measured_depth {
            return Err(GeoError::InvalidStation {
                index,
                reason: format!(
                    "measured depth {:.2} not greater than previous {:.2}",
                    s.measured_depth,
                    stations[index - 1].measured_depth
                ),
            });
        }
    }
    Ok(())
}

// ============================================================================
// Integration
// ============================================================================

/// Integrate survey stations into a positioned, risk-classified path.
///
/// Fewer than two stations yields an empty trajectory rather than an error.
/// Each point after the tie-in carries the DLS of the interval ending at it.
pub fn integrate(
    stations: &[SurveyStation],
    mode: TrajectoryMode,
    config: &TrajectoryConfig,
    risk: &RiskThresholds,
) -> Result<Trajectory, GeoError> {
    let mut trajectory = Trajectory::empty(mode, config.method);
    if stations.len() < 2 {
        debug!(stations = stations.len(), "Fewer than 2 stations, empty trajectory");
        return Ok(trajectory);
    }
    check_stations(stations)?;

    let selected: Vec<&SurveyStation> = subsample_indices(stations.len(), config.stride)
        .into_iter()
        .map(|i| &stations[i])
        .collect();

    let first = selected[0];
    let mut position = Position {
        north: 0.0,
        east: 0.0,
        tvd: first.measured_depth,
    };
    trajectory.points.reserve(selected.len());
    trajectory.points.push(TrajectoryPoint {
        measured_depth: first.measured_depth,
        inclination_deg: first.inclination_deg,
        azimuth_deg: first.azimuth_deg,
        position,
        dls: 0.0,
        risk: risk.classify(0.0),
    });

    for pair in selected.windows(2) {
        let (upper, lower) = (pair[0], pair[1]);
        let delta = project(upper, lower, config.method);
        position.north += delta.north;
        position.east += delta.east;
        position.tvd += delta.tvd;

        let dls = station_dls(upper, lower);
        trajectory.points.push(TrajectoryPoint {
            measured_depth: lower.measured_depth,
            inclination_deg: lower.inclination_deg,
            azimuth_deg: lower.azimuth_deg,
            position,
            dls,
            risk: risk.classify(dls),
        });
    }

    debug!(
        points = trajectory.points.len(),
        stations = stations.len(),
        stride = config.stride,
        synthetic = trajectory.synthetic,
        "Trajectory integrated"
    );
    Ok(trajectory)
}

/// Integrate measured inclination/azimuth curves.
pub fn survey_trajectory(
    inclination: &LogCurve,
    azimuth: &LogCurve,
    config: &TrajectoryConfig,
    risk: &RiskThresholds,
) -> Result<Trajectory, GeoError> {
    let stations = stations_from_curves(inclination, azimuth)?;
    integrate(&stations, TrajectoryMode::Survey, config, risk)
}

/// Integrate the schematic build profile over a depth series.
pub fn synthetic_trajectory(
    depths: &[f64],
    config: &TrajectoryConfig,
    risk: &RiskThresholds,
) -> Result<Trajectory, GeoError> {
    let stations = synthesize_stations(depths, &config.synthetic);
    integrate(&stations, TrajectoryMode::Synthetic, config, risk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskBand;

    fn station(md: f64, inc: f64, azi: f64) -> SurveyStation {
        SurveyStation::new(md, inc, azi).unwrap()
    }

    fn default_run(stations: &[SurveyStation]) -> Trajectory {
        integrate(
            stations,
            TrajectoryMode::Survey,
            &TrajectoryConfig::default(),
            &RiskThresholds::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_fewer_than_two_stations_is_empty() {
        assert!(default_run(&[]).is_empty());
        assert!(default_run(&[station(1000.0, 0.0, 0.0)]).is_empty());
    }

    #[test]
    fn test_vertical_well_tvd_equals_md() {
        let stations: Vec<_> = (0..10).map(|i| SurveyStation::vertical(1000.0 + 100.0 * f64::from(i))).collect();
        let t = default_run(&stations);
        assert_eq!(t.len(), 10);
        for p in &t.points {
            assert!((p.position.tvd - p.measured_depth).abs() < 1e-9);
            assert!(p.position.horizontal_displacement() < 1e-9);
            assert_eq!(p.dls, 0.0);
            assert_eq!(p.risk, RiskBand::Low);
        }
    }

    #[test]
    fn test_tangential_projection_components() {
        let stations = [station(1000.0, 0.0, 0.0), station(1100.0, 30.0, 90.0)];
        let t = default_run(&stations);
        let p = t.points[1].position;
        // 100 ft at 30 deg due east: 50 ft east, 86.6 ft down
        assert!((p.east - 50.0).abs() < 1e-9);
        assert!(p.north.abs() < 1e-9);
        assert!((p.tvd - (1000.0 + 100.0 * 30f64.to_radians().cos())).abs() < 1e-9);
    }

    #[test]
    fn test_dls_attached_to_lower_point() {
        let stations = [
            station(1000.0, 0.0, 0.0),
            station(1100.0, 5.0, 10.0),
            station(1200.0, 5.0, 10.0),
        ];
        let t = default_run(&stations);
        assert_eq!(t.points[0].dls, 0.0);
        assert!((t.points[1].dls - 5.0).abs() < 1e-9);
        assert_eq!(t.points[1].risk, RiskBand::Medium);
        assert!(t.points[2].dls < 1e-5);
        assert_eq!(t.points[2].risk, RiskBand::Low);
    }

    #[test]
    fn test_tvd_monotonic_for_increasing_md() {
        let stations: Vec<_> = (0..50)
            .map(|i| {
                let i = f64::from(i);
                station(2000.0 + 30.0 * i, (i * 1.7).min(89.0), (i * 7.0) % 360.0)
            })
            .collect();
        for method in [ProjectionMethod::Tangential, ProjectionMethod::MinimumCurvature] {
            let config = TrajectoryConfig { method, ..TrajectoryConfig::default() };
            let t = integrate(&stations, TrajectoryMode::Survey, &config, &RiskThresholds::default()).unwrap();
            for pair in t.points.windows(2) {
                assert!(
                    pair[1].position.tvd >= pair[0].position.tvd,
                    "{method:?}: tvd decreased at md {}",
                    pair[1].measured_depth
                );
            }
        }
    }

    #[test]
    fn test_minimum_curvature_matches_tangential_on_straight_hole() {
        let stations = [station(1000.0, 20.0, 45.0), station(1300.0, 20.0, 45.0)];
        let tangential = default_run(&stations);
        let config = TrajectoryConfig {
            method: ProjectionMethod::MinimumCurvature,
            ..TrajectoryConfig::default()
        };
        let arc = integrate(&stations, TrajectoryMode::Survey, &config, &RiskThresholds::default()).unwrap();
        let a = tangential.points[1].position;
        let b = arc.points[1].position;
        assert!((a.north - b.north).abs() < 1e-9);
        assert!((a.east - b.east).abs() < 1e-9);
        assert!((a.tvd - b.tvd).abs() < 1e-9);
    }

    #[test]
    fn test_minimum_curvature_quarter_circle() {
        // Building 0 -> 90 deg over an arc of radius R: tvd and horizontal both equal R
        let radius = 1000.0;
        let arc_length = radius * std::f64::consts::FRAC_PI_2;
        let stations = [station(0.0, 0.0, 0.0), station(arc_length, 90.0, 0.0)];
        let config = TrajectoryConfig {
            method: ProjectionMethod::MinimumCurvature,
            ..TrajectoryConfig::default()
        };
        let t = integrate(&stations, TrajectoryMode::Survey, &config, &RiskThresholds::default()).unwrap();
        let p = t.points[1].position;
        assert!((p.tvd - radius).abs() < 1e-6, "tvd {}", p.tvd);
        assert!((p.north - radius).abs() < 1e-6, "north {}", p.north);
    }

    #[test]
    fn test_non_increasing_depth_rejected() {
        let stations = [station(1000.0, 0.0, 0.0), station(1000.0, 1.0, 0.0)];
        let err = integrate(
            &stations,
            TrajectoryMode::Survey,
            &TrajectoryConfig::default(),
            &RiskThresholds::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GeoError::InvalidStation { index: 1, .. }));
    }

    #[test]
    fn test_out_of_range_azimuth_rejected() {
        let raw = SurveyStation {
            measured_depth: 1100.0,
            inclination_deg: 5.0,
            azimuth_deg: 370.0,
        };
        let stations = [station(1000.0, 0.0, 0.0), raw];
        let err = integrate(
            &stations,
            TrajectoryMode::Survey,
            &TrajectoryConfig::default(),
            &RiskThresholds::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GeoError::InvalidStation { index: 1, .. }));
        assert!(err.to_string().contains("azimuth"));
    }

    #[test]
    fn test_subsample_keeps_first_and_last() {
        assert_eq!(subsample_indices(0, 10), Vec::<usize>::new());
        assert_eq!(subsample_indices(1, 10), vec![0]);
        assert_eq!(subsample_indices(25, 10), vec![0, 10, 20, 24]);
        assert_eq!(subsample_indices(21, 10), vec![0, 10, 20]);
        assert_eq!(subsample_indices(5, 0), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_subsampled_trajectory_spans_full_depth() {
        let stations: Vec<_> = (0..95).map(|i| SurveyStation::vertical(f64::from(i) * 10.0)).collect();
        let config = TrajectoryConfig { stride: 10, ..TrajectoryConfig::default() };
        let t = integrate(&stations, TrajectoryMode::Survey, &config, &RiskThresholds::default()).unwrap();
        assert_eq!(t.points.first().unwrap().measured_depth, 0.0);
        assert_eq!(t.points.last().unwrap().measured_depth, 940.0);
        assert!(t.points.windows(2).all(|w| w[1].measured_depth > w[0].measured_depth));
    }

    #[test]
    fn test_synthetic_profile_shape() {
        let depths: Vec<f64> = (0..=100).map(|i| 1000.0 + f64::from(i) * 10.0).collect();
        let profile = SyntheticProfileConfig {
            kickoff_fraction: 0.5,
            build_rate_deg_per_100: 3.0,
            max_inclination_deg: 9.0,
            azimuth_deg: 45.0,
        };
        let stations = synthesize_stations(&depths, &profile);
        assert_eq!(stations.len(), depths.len());
        // Vertical down to kick-off at 1500
        assert!(stations.iter().filter(|s| s.measured_depth <= 1500.0).all(|s| s.inclination_deg == 0.0));
        // Monotone build, capped at hold angle
        assert!(stations.windows(2).all(|w| w[1].inclination_deg >= w[0].inclination_deg));
        assert_eq!(stations.last().unwrap().inclination_deg, 9.0);
        assert!(stations.iter().all(|s| s.azimuth_deg == 45.0));
    }

    #[test]
    fn test_synthetic_build_section_dls_equals_build_rate() {
        let depths: Vec<f64> = (0..=200).map(|i| f64::from(i) * 10.0).collect();
        let config = TrajectoryConfig::default(); // 2 deg/100 from 30% of TD, hold at 60
        let t = synthetic_trajectory(&depths, &config, &RiskThresholds::default()).unwrap();
        assert!(t.synthetic);
        assert_eq!(t.mode, TrajectoryMode::Synthetic);
        let building: Vec<_> = t
            .points
            .iter()
            .filter(|p| p.measured_depth > 700.0 && p.inclination_deg < 60.0)
            .collect();
        assert!(!building.is_empty());
        for p in building {
            assert!((p.dls - 2.0).abs() < 1e-6, "dls {} at {}", p.dls, p.measured_depth);
        }
    }

    #[test]
    fn test_synthetic_drops_missing_depths() {
        let depths = [100.0, f64::NAN, 200.0, 150.0, 300.0];
        let stations = synthesize_stations(&depths, &SyntheticProfileConfig::default());
        let md: Vec<f64> = stations.iter().map(|s| s.measured_depth).collect();
        assert_eq!(md, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_stations_from_curves_skips_missing_samples() {
        let inc = LogCurve::from_columns("INC", &[100.0, 200.0, 300.0], &[1.0, f64::NAN, 3.0]).unwrap();
        let azi = LogCurve::from_columns("AZI", &[100.0, 200.0, 300.0], &[10.0, 20.0, 30.0]).unwrap();
        let stations = stations_from_curves(&inc, &azi).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[1].measured_depth, 300.0);
    }

    #[test]
    fn test_stations_from_curves_detects_misalignment() {
        let inc = LogCurve::from_columns("INC", &[100.0, 200.0], &[1.0, 2.0]).unwrap();
        let azi = LogCurve::from_columns("AZI", &[100.0, 250.0], &[10.0, 20.0]).unwrap();
        assert!(matches!(
            stations_from_curves(&inc, &azi),
            Err(GeoError::CurveMisaligned { index: 1, .. })
        ));
    }

    #[test]
    fn test_stations_from_curves_reports_bad_station_index() {
        let inc = LogCurve::from_columns("INC", &[100.0, 200.0], &[1.0, 250.0]).unwrap();
        let azi = LogCurve::from_columns("AZI", &[100.0, 200.0], &[10.0, 20.0]).unwrap();
        assert!(matches!(
            stations_from_curves(&inc, &azi),
            Err(GeoError::InvalidStation { index: 1, .. })
        ));
    }
}
