//! Acoustic impedance and reflectivity from sonic (and optional density) logs
//!
//! ```text
//! velocity  = 1e6 / DT                     (DT in µs per unit length)
//! density   = RHOB, or 0.23 · velocity^0.25 (Gardner, estimated)
//! Z         = velocity · density
//! RC[i]     = (Z[i] − Z[i−1]) / (Z[i] + Z[i−1]),  RC[0] = 0
//! TWT[i]    = TWT[i−1] + 2 · (DT[i] / 1e6) · (depth[i] − depth[i−1])
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::defaults::{
    GARDNER_COEFFICIENT, GARDNER_EXPONENT, IMPEDANCE_SUM_EPSILON, SONIC_TO_VELOCITY,
    STRONG_CONTRAST_RC,
};
use crate::error::GeoError;
use crate::types::{DensitySource, ImpedanceSample, ReflectivitySample};

/// Gardner's velocity-density relation (imperial: ft/s in, g/cc out).
///
/// An empirical approximation. Densities from here are estimates and are
/// flagged as such on every sample that uses them.
pub fn gardner_density(velocity: f64) -> f64 {
    GARDNER_COEFFICIENT * velocity.powf(GARDNER_EXPONENT)
}

/// Compressional velocity from sonic transit time.
pub fn sonic_velocity(transit_time: f64) -> f64 {
    SONIC_TO_VELOCITY / transit_time
}

/// Build the impedance log on the sonic depth index.
///
/// `density`, when given, must be laid out on the same index as `sonic`
/// (missing values as NaN). Samples with missing depth or a missing or
/// non-positive transit time are skipped. A NaN density at a kept sample
/// falls back to Gardner's relation for that sample only.
///
/// Returns `InsufficientData` when no usable sonic sample remains.
pub fn acoustic_impedance(
    depth: &[f64],
    sonic: &[f64],
    density: Option<&[f64]>,
) -> Result<Vec<ImpedanceSample>, GeoError> {
    if depth.len() != sonic.len() {
        return Err(GeoError::LengthMismatch {
            what: "depth/sonic",
            expected: depth.len(),
            found: sonic.len(),
        });
    }
    if let Some(rho) = density {
        if rho.len() != sonic.len() {
            return Err(GeoError::LengthMismatch {
                what: "sonic/density",
                expected: sonic.len(),
                found: rho.len(),
            });
        }
    }

    let mut samples: Vec<ImpedanceSample> = Vec::with_capacity(sonic.len());
    let mut skipped = 0usize;
    let mut estimated = 0usize;

    for (i, (&d, &dt)) in depth.iter().zip(sonic).enumerate() {
        if !d.is_finite() || !dt.is_finite() || dt <= 0.0 {
            skipped += 1;
            continue;
        }
        let velocity = sonic_velocity(dt);
        let measured = density.map(|rho| rho[i]).filter(|r| r.is_finite() && *r > 0.0);
        let (rho, density_estimated) = match measured {
            Some(r) => (r, false),
            None => {
                estimated += 1;
                (gardner_density(velocity), true)
            }
        };

        let twt_s = match samples.last() {
            Some(prev) => prev.twt_s + 2.0 * (dt / SONIC_TO_VELOCITY) * (d - prev.depth).max(0.0),
            None => 0.0,
        };

        samples.push(ImpedanceSample {
            depth: d,
            transit_time: dt,
            velocity,
            density: rho,
            density_estimated,
            impedance: velocity * rho,
            twt_s,
        });
    }

    if samples.is_empty() {
        return Err(GeoError::InsufficientData {
            product: "synthetic seismogram",
            needs: "DT (sonic) curve",
            needed: 1,
            available: 0,
        });
    }
    if skipped > 0 {
        warn!(skipped, kept = samples.len(), "Skipped sonic samples with missing or non-positive transit time");
    }
    if estimated > 0 {
        warn!(
            estimated,
            total = samples.len(),
            "Density estimated via Gardner relation, not measured"
        );
    }
    debug!(samples = samples.len(), "Impedance log built");
    Ok(samples)
}

/// Normal-incidence reflection coefficients between consecutive samples.
///
/// The first coefficient is 0 (no interface above). A near-zero impedance
/// sum yields 0 rather than a non-finite value.
pub fn reflectivity(impedance: &[ImpedanceSample]) -> Vec<ReflectivitySample> {
    let mut out = Vec::with_capacity(impedance.len());
    let mut previous: Option<f64> = None;
    for sample in impedance {
        let z = sample.impedance;
        let coefficient = match previous {
            None => 0.0,
            Some(z_prev) => {
                let sum = z + z_prev;
                if sum.abs() < IMPEDANCE_SUM_EPSILON {
                    0.0
                } else {
                    (z - z_prev) / sum
                }
            }
        };
        out.push(ReflectivitySample { depth: sample.depth, coefficient });
        previous = Some(z);
    }
    out
}

/// Classify where the densities of an impedance log came from.
pub fn density_source(impedance: &[ImpedanceSample]) -> DensitySource {
    let estimated = impedance.iter().filter(|s| s.density_estimated).count();
    if estimated == 0 {
        DensitySource::Measured
    } else if estimated == impedance.len() {
        DensitySource::Estimated
    } else {
        DensitySource::Mixed
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Headline numbers of an impedance/reflectivity pair for reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpedanceSummary {
    pub samples: usize,
    pub impedance_min: f64,
    pub impedance_mean: f64,
    pub impedance_max: f64,
    pub rc_min: f64,
    pub rc_max: f64,
    /// Any |RC| above the strong-contrast level
    pub strong_contrasts: bool,
    pub density_source: DensitySource,
}

impl ImpedanceSummary {
    pub fn from_logs(impedance: &[ImpedanceSample], reflectivity: &[ReflectivitySample]) -> Self {
        let (mut z_min, mut z_max, mut z_sum) = (f64::INFINITY, f64::NEG_INFINITY, 0.0);
        for s in impedance {
            z_min = z_min.min(s.impedance);
            z_max = z_max.max(s.impedance);
            z_sum += s.impedance;
        }
        let (mut rc_min, mut rc_max) = (0.0_f64, 0.0_f64);
        for r in reflectivity {
            rc_min = rc_min.min(r.coefficient);
            rc_max = rc_max.max(r.coefficient);
        }
        let n = impedance.len();
        Self {
            samples: n,
            impedance_min: if n == 0 { 0.0 } else { z_min },
            impedance_mean: if n == 0 { 0.0 } else { z_sum / n as f64 },
            impedance_max: if n == 0 { 0.0 } else { z_max },
            rc_min,
            rc_max,
            strong_contrasts: rc_min.abs().max(rc_max.abs()) > STRONG_CONTRAST_RC,
            density_source: density_source(impedance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_and_gardner() {
        // 100 µs/ft -> 10,000 ft/s -> 0.23 * 10 = 2.3 g/cc
        assert!((sonic_velocity(100.0) - 10_000.0).abs() < 1e-9);
        assert!((gardner_density(10_000.0) - 2.3).abs() < 1e-12);
    }

    #[test]
    fn test_measured_density_used_when_present() {
        let imp = acoustic_impedance(&[1000.0, 1001.0], &[100.0, 80.0], Some(&[2.4, 2.5])).unwrap();
        assert_eq!(imp.len(), 2);
        assert!(!imp[0].density_estimated);
        assert!((imp[0].impedance - 10_000.0 * 2.4).abs() < 1e-9);
        assert!((imp[1].impedance - 12_500.0 * 2.5).abs() < 1e-9);
        assert_eq!(density_source(&imp), DensitySource::Measured);
    }

    #[test]
    fn test_gardner_fallback_flagged() {
        let imp = acoustic_impedance(&[1000.0, 1001.0], &[100.0, 100.0], None).unwrap();
        assert!(imp.iter().all(|s| s.density_estimated));
        assert!((imp[0].density - 2.3).abs() < 1e-12);
        assert_eq!(density_source(&imp), DensitySource::Estimated);
    }

    #[test]
    fn test_nan_density_falls_back_per_sample() {
        let imp =
            acoustic_impedance(&[1.0, 2.0, 3.0], &[100.0, 100.0, 100.0], Some(&[2.4, f64::NAN, 2.5]))
                .unwrap();
        assert!(!imp[0].density_estimated);
        assert!(imp[1].density_estimated);
        assert!(!imp[2].density_estimated);
        assert_eq!(density_source(&imp), DensitySource::Mixed);
    }

    #[test]
    fn test_missing_sonic_samples_skipped_not_zeroed() {
        let imp = acoustic_impedance(&[1.0, 2.0, 3.0, 4.0], &[100.0, f64::NAN, 0.0, 90.0], None).unwrap();
        let depths: Vec<f64> = imp.iter().map(|s| s.depth).collect();
        assert_eq!(depths, vec![1.0, 4.0]);
        assert!(imp.iter().all(|s| s.impedance.is_finite() && s.impedance > 0.0));
    }

    #[test]
    fn test_no_sonic_is_insufficient_data() {
        let err = acoustic_impedance(&[], &[], None).unwrap_err();
        assert!(err.is_recoverable());
        let err = acoustic_impedance(&[1.0, 2.0], &[f64::NAN, f64::NAN], None).unwrap_err();
        assert!(matches!(err, GeoError::InsufficientData { .. }));
    }

    #[test]
    fn test_length_mismatch_is_contract_violation() {
        let err = acoustic_impedance(&[1.0, 2.0], &[100.0], None).unwrap_err();
        assert!(!err.is_recoverable());
        let err = acoustic_impedance(&[1.0, 2.0], &[100.0, 90.0], Some(&[2.3])).unwrap_err();
        assert!(matches!(err, GeoError::LengthMismatch { what: "sonic/density", .. }));
    }

    #[test]
    fn test_twt_accumulates_monotonically() {
        let depth: Vec<f64> = (0..10).map(|i| 1000.0 + f64::from(i) * 10.0).collect();
        let sonic = vec![100.0; 10];
        let imp = acoustic_impedance(&depth, &sonic, None).unwrap();
        assert_eq!(imp[0].twt_s, 0.0);
        // 10 ft at 100 µs/ft, two-way: 2 ms per step
        assert!((imp[1].twt_s - 0.002).abs() < 1e-12);
        assert!((imp[9].twt_s - 0.018).abs() < 1e-12);
        assert!(imp.windows(2).all(|w| w[1].twt_s >= w[0].twt_s));
    }

    #[test]
    fn test_reflectivity_first_zero_and_formula() {
        let imp = acoustic_impedance(&[1.0, 2.0, 3.0], &[100.0, 100.0, 50.0], Some(&[2.0, 2.0, 2.0]))
            .unwrap();
        let rc = reflectivity(&imp);
        assert_eq!(rc.len(), 3);
        assert_eq!(rc[0].coefficient, 0.0);
        assert_eq!(rc[1].coefficient, 0.0);
        // Z doubles: (2 - 1) / (2 + 1)
        assert!((rc[2].coefficient - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_impedance_sum_yields_zero() {
        let zero = ImpedanceSample {
            depth: 1.0,
            transit_time: 100.0,
            velocity: 0.0,
            density: 0.0,
            density_estimated: false,
            impedance: 0.0,
            twt_s: 0.0,
        };
        let rc = reflectivity(&[zero, ImpedanceSample { depth: 2.0, ..zero }]);
        assert_eq!(rc[1].coefficient, 0.0);
    }

    #[test]
    fn test_summary_flags_strong_contrast() {
        let imp = acoustic_impedance(&[1.0, 2.0], &[100.0, 50.0], Some(&[2.0, 2.0])).unwrap();
        let rc = reflectivity(&imp);
        let summary = ImpedanceSummary::from_logs(&imp, &rc);
        assert!(summary.strong_contrasts);
        assert_eq!(summary.samples, 2);
        assert!((summary.impedance_min - 20_000.0).abs() < 1e-9);
        assert!((summary.impedance_max - 40_000.0).abs() < 1e-9);
        assert!((summary.impedance_mean - 30_000.0).abs() < 1e-9);
        assert_eq!(summary.density_source, DensitySource::Measured);
    }
}
