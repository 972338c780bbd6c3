//! Drilling geometry: dog-leg severity, trajectory integration, risk report
//!
//! ## Data Flow
//!
//! ```text
//! INC/AZI curves ──► stations_from_curves ──┐
//!                                           ├──► integrate ──► Trajectory ──► risk_report
//! depth only ──► synthesize_stations ───────┘        │
//!                                                    └── dog_leg_severity per station pair
//! ```

pub mod dog_leg;
pub mod risk_report;
pub mod trajectory;

pub use dog_leg::{classify_dls, dog_leg_angle, dog_leg_severity, station_dls};
pub use risk_report::{risk_report, BandCounts, DrillingRiskReport, RiskInterval};
pub use trajectory::{
    integrate, stations_from_curves, subsample_indices, survey_trajectory, synthesize_stations,
    synthetic_trajectory,
};
