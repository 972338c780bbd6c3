//! Shared data structures for the geometry and geophysics engine
//!
//! - Log input: CurveSample, LogCurve, CurveSet, WellHeader
//! - Drilling geometry: SurveyStation, TrajectoryPoint, Trajectory, RiskBand
//! - Geophysics: ImpedanceSample, ReflectivitySample, Wavelet, SyntheticTrace, SeismicSection

mod curves;
mod seismic;
mod trajectory;

pub use curves::*;
pub use seismic::*;
pub use trajectory::*;
