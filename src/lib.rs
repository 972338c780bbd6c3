//! WellGeo: Borehole Geometry & Synthetic Geophysics Engine
//!
//! Turns depth-indexed well-log curves into two engineering products.
//!
//! ## Architecture
//!
//! - **Curve Resolver**: canonical curve names over ordered alias tables
//! - **Drilling**: dog-leg severity (Lubinski), DLS risk bands, trajectory
//!   integration (tangential or minimum curvature), drilling-risk report
//! - **Geophysics**: acoustic impedance (Gardner fallback), reflectivity,
//!   Ricker wavelet, same-length convolution, schematic 2D section
//! - **Pipeline**: runs the trajectory and seismic branches concurrently
//!
//! The calculators are pure functions over immutable slices. Memoising
//! results across input changes is the caller's business.

pub mod config;
pub mod curves;
pub mod drilling;
pub mod error;
pub mod geophysics;
pub mod logs;
pub mod pipeline;
pub mod types;

// Re-export configuration
pub use config::EngineConfig;

// Re-export commonly used types
pub use types::{
    CurveSample, CurveSet, DensitySource, ImpedanceSample, LogCurve, Polarity, Position,
    ProjectionMethod, ReflectivitySample, RiskBand, SeismicSection, SurveyStation,
    SyntheticTrace, Trajectory, TrajectoryMode, TrajectoryPoint, Wavelet, WellHeader,
};

// Re-export errors
pub use error::GeoError;
pub use logs::LogReadError;

// Re-export the top-level operations
pub use curves::{resolve, CanonicalCurve, ResolvedCurves};
pub use drilling::{dog_leg_severity, integrate, risk_report, DrillingRiskReport};
pub use geophysics::{
    acoustic_impedance, build_section, convolve, normalize, reflectivity, ricker_wavelet,
    SeismicProducts,
};
pub use pipeline::{compute_products, Availability, TrajectoryProducts, WellProducts};
