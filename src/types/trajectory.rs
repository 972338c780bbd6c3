//! Survey stations, trajectory points, and DLS risk bands

use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// One directional survey station.
///
/// Inclination is measured from vertical in [0, 180] degrees; azimuth is
/// normalised into [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyStation {
    /// Measured (along-hole) depth (ft or m)
    pub measured_depth: f64,
    /// Inclination from vertical (degrees)
    pub inclination_deg: f64,
    /// Azimuth clockwise from north (degrees)
    pub azimuth_deg: f64,
}

impl SurveyStation {
    /// Build a station, normalising azimuth and rejecting impossible values.
    pub fn new(
        measured_depth: f64,
        inclination_deg: f64,
        azimuth_deg: f64,
    ) -> Result<Self, GeoError> {
        if !measured_depth.is_finite() || !inclination_deg.is_finite() || !azimuth_deg.is_finite()
        {
            return Err(GeoError::InvalidStation {
                index: 0,
                reason: format!(
                    "non-finite value (md={measured_depth}, inc={inclination_deg}, azi={azimuth_deg})"
                ),
            });
        }
        if !(0.0..=180.0).contains(&inclination_deg) {
            return Err(GeoError::InvalidStation {
                index: 0,
                reason: format!("inclination {inclination_deg:.2} outside [0, 180]"),
            });
        }
        Ok(Self {
            measured_depth,
            inclination_deg,
            azimuth_deg: azimuth_deg.rem_euclid(360.0),
        })
    }

    /// A station on a perfectly vertical hole.
    pub const fn vertical(measured_depth: f64) -> Self {
        Self {
            measured_depth,
            inclination_deg: 0.0,
            azimuth_deg: 0.0,
        }
    }
}

/// Cartesian position in data space: north/east horizontal, TVD positive down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub north: f64,
    pub east: f64,
    pub tvd: f64,
}

impl Position {
    pub fn horizontal_displacement(&self) -> f64 {
        self.north.hypot(self.east)
    }
}

/// Ordered drilling-risk severity of a dog-leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskBand {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One integrated point of the well path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub measured_depth: f64,
    pub inclination_deg: f64,
    pub azimuth_deg: f64,
    pub position: Position,
    /// Dog-leg severity of the interval ending at this point (deg/100)
    pub dls: f64,
    pub risk: RiskBand,
}

/// Where the stations came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryMode {
    /// Measured inclination/azimuth survey
    Survey,
    /// Schematic build profile fabricated from depth alone
    Synthetic,
}

/// How each course length is projected into Cartesian increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMethod {
    /// Lower-station angles held over the whole course length
    #[default]
    Tangential,
    /// Circular arc between stations (ratio-factor corrected average angle)
    MinimumCurvature,
}

/// An integrated well path.
///
/// `synthetic` is true whenever the geometry was fabricated rather than
/// measured; consumers must not present such a path as survey data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub mode: TrajectoryMode,
    pub synthetic: bool,
    pub method: ProjectionMethod,
    pub points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn empty(mode: TrajectoryMode, method: ProjectionMethod) -> Self {
        Self {
            mode,
            synthetic: mode == TrajectoryMode::Synthetic,
            method,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_dls(&self) -> f64 {
        self.points.iter().map(|p| p.dls).fold(0.0, f64::max)
    }

    pub fn final_position(&self) -> Option<Position> {
        self.points.last().map(|p| p.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_normalises_azimuth() {
        let s = SurveyStation::new(1000.0, 10.0, 370.0).unwrap();
        assert!((s.azimuth_deg - 10.0).abs() < 1e-12);
        let s = SurveyStation::new(1000.0, 10.0, -30.0).unwrap();
        assert!((s.azimuth_deg - 330.0).abs() < 1e-12);
    }

    #[test]
    fn test_station_rejects_bad_inclination() {
        assert!(SurveyStation::new(1000.0, 181.0, 0.0).is_err());
        assert!(SurveyStation::new(1000.0, -1.0, 0.0).is_err());
        assert!(SurveyStation::new(f64::NAN, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_risk_bands_are_ordered() {
        assert!(RiskBand::Low < RiskBand::Medium);
        assert!(RiskBand::Medium < RiskBand::High);
        assert!(RiskBand::High < RiskBand::Critical);
    }

    #[test]
    fn test_synthetic_flag_follows_mode() {
        let t = Trajectory::empty(TrajectoryMode::Synthetic, ProjectionMethod::Tangential);
        assert!(t.synthetic);
        let t = Trajectory::empty(TrajectoryMode::Survey, ProjectionMethod::Tangential);
        assert!(!t.synthetic);
        assert_eq!(t.max_dls(), 0.0);
    }
}
