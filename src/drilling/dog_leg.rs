//! Dog-leg severity between survey stations
//!
//! Spherical-curvature (Lubinski) dog-leg angle:
//!
//! ```text
//! cos(β) = cos(I1)·cos(I2) + sin(I1)·sin(I2)·cos(A2 − A1)
//! DLS    = β(deg) × 100 / (MD2 − MD1)
//! ```

use crate::config::defaults::DLS_REFERENCE_LENGTH;
use crate::config::RiskThresholds;
use crate::types::{RiskBand, SurveyStation};

/// Dog-leg angle between two borehole directions (radians).
///
/// Only the azimuth difference matters. `cos(β)` is clamped to [-1, 1]
/// before `acos` so rounding can never produce NaN.
pub fn dog_leg_angle(inc1_deg: f64, azi1_deg: f64, inc2_deg: f64, azi2_deg: f64) -> f64 {
    let i1 = inc1_deg.to_radians();
    let i2 = inc2_deg.to_radians();
    let delta_azi = (azi2_deg - azi1_deg).to_radians();

    let cos_beta = i1.cos() * i2.cos() + i1.sin() * i2.sin() * delta_azi.cos();
    cos_beta.clamp(-1.0, 1.0).acos()
}

/// Calculate dog-leg severity (deg/100 of course length)
///
/// Where:
/// - MD = measured depth (ft or m; DLS comes out per 100 of the same unit)
/// - INC = inclination from vertical (deg)
/// - AZI = azimuth (deg)
///
/// Returns 0 when the course length is zero or negative.
pub fn dog_leg_severity(
    md1: f64,
    inc1_deg: f64,
    azi1_deg: f64,
    md2: f64,
    inc2_deg: f64,
    azi2_deg: f64,
) -> f64 {
    let course_length = md2 - md1;
    if course_length <= 0.0 || !course_length.is_finite() {
        return 0.0;
    }

    let beta = dog_leg_angle(inc1_deg, azi1_deg, inc2_deg, azi2_deg);
    beta.to_degrees() * DLS_REFERENCE_LENGTH / course_length
}

/// DLS over the interval from `upper` to `lower`.
pub fn station_dls(upper: &SurveyStation, lower: &SurveyStation) -> f64 {
    dog_leg_severity(
        upper.measured_depth,
        upper.inclination_deg,
        upper.azimuth_deg,
        lower.measured_depth,
        lower.inclination_deg,
        lower.azimuth_deg,
    )
}

/// Classify a DLS value against configured cut points.
pub fn classify_dls(dls: f64, thresholds: &RiskThresholds) -> RiskBand {
    thresholds.classify(dls)
}
