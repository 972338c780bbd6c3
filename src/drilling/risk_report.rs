//! Drilling-risk report over an integrated trajectory
//!
//! Tabular view of the severe intervals: everything at or above the
//! reporting floor, most severe first, capped at a fixed number of rows.

use serde::{Deserialize, Serialize};

use crate::config::RiskReportConfig;
use crate::types::{RiskBand, Trajectory};

/// One reported interval, identified by the measured depth of its lower end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskInterval {
    pub measured_depth: f64,
    pub tvd: f64,
    pub inclination_deg: f64,
    pub azimuth_deg: f64,
    pub dls: f64,
    pub risk: RiskBand,
}

/// Number of trajectory points per band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BandCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl BandCounts {
    fn add(&mut self, band: RiskBand) {
        match band {
            RiskBand::Low => self.low += 1,
            RiskBand::Medium => self.medium += 1,
            RiskBand::High => self.high += 1,
            RiskBand::Critical => self.critical += 1,
        }
    }

    pub fn get(&self, band: RiskBand) -> usize {
        match band {
            RiskBand::Low => self.low,
            RiskBand::Medium => self.medium,
            RiskBand::High => self.high,
            RiskBand::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillingRiskReport {
    /// Carried from the trajectory so a schematic path is never reported as measured
    pub synthetic: bool,
    pub max_dls: f64,
    /// Highest band reached anywhere on the path
    pub worst_band: RiskBand,
    pub band_counts: BandCounts,
    /// Intervals at or above the reporting floor, DLS descending
    pub intervals: Vec<RiskInterval>,
}

/// Summarise a trajectory's DLS distribution.
pub fn risk_report(trajectory: &Trajectory, config: &RiskReportConfig) -> DrillingRiskReport {
    let mut band_counts = BandCounts::default();
    let mut worst_band = RiskBand::Low;
    let mut intervals = Vec::new();

    for point in &trajectory.points {
        band_counts.add(point.risk);
        worst_band = worst_band.max(point.risk);
        if point.dls >= config.min_reported_dls {
            intervals.push(RiskInterval {
                measured_depth: point.measured_depth,
                tvd: point.position.tvd,
                inclination_deg: point.inclination_deg,
                azimuth_deg: point.azimuth_deg,
                dls: point.dls,
                risk: point.risk,
            });
        }
    }

    intervals.sort_by(|a, b| b.dls.total_cmp(&a.dls));
    intervals.truncate(config.max_entries);

    DrillingRiskReport {
        synthetic: trajectory.synthetic,
        max_dls: trajectory.max_dls(),
        worst_band,
        band_counts,
        intervals,
    }
}
