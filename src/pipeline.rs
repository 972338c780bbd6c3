//! Product pipeline: curves in, trajectory and seismic products out
//!
//! ## Data Flow
//!
//! ```text
//! CurveSet ──► ResolvedCurves ──┬──► trajectory branch ──► TrajectoryProducts ──┐
//!                               │        (rayon::join)                          ├──► WellProducts
//!                               └──► seismic branch ────► SeismicProducts ──────┘
//! ```
//!
//! The two branches share nothing mutable and run concurrently. A branch
//! that cannot produce its product reports `Unavailable` with a reason;
//! nothing here aborts the caller.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::curves::{CanonicalCurve, ResolvedCurves};
use crate::drilling::{risk_report, survey_trajectory, synthetic_trajectory, DrillingRiskReport};
use crate::error::GeoError;
use crate::geophysics::{seismic_products, SeismicProducts};
use crate::types::{CurveSet, Trajectory, WellHeader};

// ============================================================================
// Availability
// ============================================================================

/// A product, or the reason it could not be built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    Unavailable {
        reason: String,
        /// False when the input broke a contract (misaligned or unequal curves)
        recoverable: bool,
    },
}

impl<T> Availability<T> {
    fn from_result(result: Result<T, GeoError>, product: &'static str) -> Self {
        match result {
            Ok(value) => Self::Available(value),
            Err(e) => {
                let recoverable = e.is_recoverable();
                if recoverable {
                    warn!(product, reason = %e, "Product unavailable");
                } else {
                    warn!(product, error = %e, "Product unavailable: invalid input curves");
                }
                Self::Unavailable {
                    reason: e.to_string(),
                    recoverable,
                }
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Availability<U> {
        match self {
            Self::Available(value) => Availability::Available(f(value)),
            Self::Unavailable { reason, recoverable } => {
                Availability::Unavailable { reason, recoverable }
            }
        }
    }
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryProducts {
    pub trajectory: Trajectory,
    pub risk_report: DrillingRiskReport,
}

/// Everything computed for one well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellProducts {
    pub well: WellHeader,
    pub generated_at: DateTime<Utc>,
    /// Canonical curve name → mnemonic actually used
    pub curves_used: BTreeMap<String, String>,
    pub trajectory: Availability<TrajectoryProducts>,
    pub seismic: Availability<SeismicProducts>,
}

impl WellProducts {
    /// Copy with the seismic series thinned for display.
    pub fn decimated(&self, max_points: usize) -> Self {
        Self {
            seismic: self.seismic.clone().map(|s| s.decimated(max_points)),
            ..self.clone()
        }
    }
}

// ============================================================================
// Branches
// ============================================================================

/// Depth index for the schematic profile: the depth curve, else the
/// index of the first non-empty curve.
fn depth_index(resolved: &ResolvedCurves<'_>, curves: &CurveSet) -> Vec<f64> {
    if !resolved.depth.is_empty() {
        return resolved.depth.values();
    }
    curves
        .curves
        .values()
        .find(|c| !c.is_empty())
        .map(|c| c.depths())
        .unwrap_or_default()
}

/// Trajectory and risk report. Measured survey when INC and AZI both
/// resolve, otherwise the schematic build profile over the depth index.
pub fn trajectory_branch(
    resolved: &ResolvedCurves<'_>,
    curves: &CurveSet,
    config: &EngineConfig,
) -> Availability<TrajectoryProducts> {
    let result = if resolved.has_survey() {
        survey_trajectory(resolved.inclination, resolved.azimuth, &config.trajectory, &config.risk)
    } else {
        let depths = depth_index(resolved, curves);
        if depths.is_empty() {
            Err(GeoError::InsufficientData {
                product: "trajectory",
                needs: "INC/AZI survey curves or a depth index",
                needed: 2,
                available: 0,
            })
        } else {
            warn!(
                samples = depths.len(),
                "No INC/AZI survey curves, using schematic build profile"
            );
            synthetic_trajectory(&depths, &config.trajectory, &config.risk)
        }
    };

    let result = result.map(|trajectory| {
        let report = risk_report(&trajectory, &config.risk.report);
        info!(
            points = trajectory.len(),
            mode = ?trajectory.mode,
            synthetic = trajectory.synthetic,
            max_dls = format!("{:.2}", report.max_dls),
            worst_band = %report.worst_band,
            "Trajectory complete"
        );
        TrajectoryProducts {
            trajectory,
            risk_report: report,
        }
    });
    Availability::from_result(result, "trajectory")
}

/// Impedance, reflectivity, synthetic trace and schematic section on the
/// sonic depth index. Density is aligned to the sonic samples.
pub fn seismic_branch(resolved: &ResolvedCurves<'_>, config: &EngineConfig) -> Availability<SeismicProducts> {
    Availability::from_result(run_seismic(resolved, config), "synthetic seismogram")
}

fn run_seismic(resolved: &ResolvedCurves<'_>, config: &EngineConfig) -> Result<SeismicProducts, GeoError> {
    let sonic = resolved.sonic;
    let density = if resolved.density.is_empty() {
        None
    } else {
        Some(resolved.density.align_to(sonic)?)
    };
    let mut rng = match config.section.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    seismic_products(
        &sonic.depths(),
        &sonic.values(),
        density.as_deref(),
        &config.seismic,
        &config.section,
        &mut rng,
    )
}

// ============================================================================
// Entry Point
// ============================================================================

fn labelled_header(header: &WellHeader, config: &EngineConfig) -> WellHeader {
    let mut well = header.clone();
    if well.name.is_empty() {
        well.name = config.well.name.clone();
    }
    if well.field.is_empty() {
        well.field = config.well.field.clone();
    }
    if well.operator.is_empty() {
        well.operator = config.well.operator.clone();
    }
    well
}

/// Compute every product for one well.
///
/// Pure with respect to its inputs apart from the section jitter, which is
/// reproducible when `section.seed` is set.
pub fn compute_products(curves: &CurveSet, config: &EngineConfig) -> WellProducts {
    let resolved = ResolvedCurves::resolve(curves, &config.curves);

    let curves_used: BTreeMap<String, String> = CanonicalCurve::ALL
        .iter()
        .zip([
            resolved.depth,
            resolved.inclination,
            resolved.azimuth,
            resolved.sonic,
            resolved.density,
            resolved.gamma_ray,
        ])
        .filter(|(_, curve)| !curve.is_empty())
        .map(|(canonical, curve)| (canonical.canonical_name().to_string(), curve.mnemonic.clone()))
        .collect();

    let (trajectory, seismic) = rayon::join(
        || trajectory_branch(&resolved, curves, config),
        || seismic_branch(&resolved, config),
    );

    let well = labelled_header(&curves.header, config);
    info!(
        well = %well.name,
        trajectory = trajectory.is_available(),
        seismic = seismic.is_available(),
        "Well products computed"
    );

    WellProducts {
        well,
        generated_at: Utc::now(),
        curves_used,
        trajectory,
        seismic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogCurve;

    fn curve(name: &str, depths: &[f64], values: &[f64]) -> LogCurve {
        LogCurve::from_columns(name, depths, values).unwrap()
    }

    fn depths(n: usize) -> Vec<f64> {
        (0..n).map(|i| 1500.0 + i as f64 * 5.0).collect()
    }

    fn seeded() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.section.seed = Some(11);
        config
    }

    #[test]
    fn test_missing_sonic_unavailable_but_trajectory_available() {
        let d = depths(50);
        let mut set = CurveSet::new(WellHeader::default());
        set.insert(curve("DEPT", &d, &d));
        set.insert(curve("GR", &d, &vec![60.0; 50]));

        let products = compute_products(&set, &seeded());
        match &products.seismic {
            Availability::Unavailable { reason, recoverable } => {
                assert!(recoverable);
                assert!(reason.contains("DT (sonic) curve"));
            }
            Availability::Available(_) => panic!("seismic should be unavailable without sonic"),
        }
        let t = products.trajectory.available().unwrap();
        assert!(t.trajectory.synthetic);
        assert_eq!(t.trajectory.len(), 50);
        assert_eq!(products.well.name, "DEFAULT");
    }

    #[test]
    fn test_survey_curves_give_measured_trajectory() {
        let d = depths(20);
        let inc: Vec<f64> = (0..20).map(|i| f64::from(i) * 0.5).collect();
        let mut set = CurveSet::new(WellHeader::default());
        set.insert(curve("INCL", &d, &inc));
        set.insert(curve("AZIM", &d, &vec![120.0; 20]));

        let products = compute_products(&set, &seeded());
        let t = products.trajectory.available().unwrap();
        assert!(!t.trajectory.synthetic);
        assert_eq!(products.curves_used.get("INC").map(String::as_str), Some("INCL"));
        assert_eq!(products.curves_used.get("AZI").map(String::as_str), Some("AZIM"));
    }

    #[test]
    fn test_misaligned_density_is_unrecoverable() {
        let d = depths(10);
        let shifted: Vec<f64> = d.iter().map(|x| x + 0.25).collect();
        let mut set = CurveSet::new(WellHeader::default());
        set.insert(curve("DT", &d, &vec![80.0; 10]));
        set.insert(curve("RHOB", &shifted, &vec![2.4; 10]));

        let products = compute_products(&set, &seeded());
        assert!(matches!(
            products.seismic,
            Availability::Unavailable { recoverable: false, .. }
        ));
    }

    #[test]
    fn test_nothing_loaded() {
        let products = compute_products(&CurveSet::default(), &EngineConfig::default());
        assert!(!products.trajectory.is_available());
        assert!(!products.seismic.is_available());
        assert!(products.curves_used.is_empty());
    }

    #[test]
    fn test_availability_serializes_with_status_tag() {
        let a: Availability<u32> = Availability::Unavailable {
            reason: "needs DT".to_string(),
            recoverable: true,
        };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["reason"], "needs DT");
    }
}
