//! System-wide default constants.
//!
//! Centralises the magic numbers of the engine. Grouped by subsystem for
//! easy discovery.

// ============================================================================
// Configuration
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "WELLGEO_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "wellgeo.toml";

// ============================================================================
// Drilling
// ============================================================================

/// Course length DLS is normalised to (deg per 100 ft, or per 100 m).
pub const DLS_REFERENCE_LENGTH: f64 = 100.0;

/// Dog-leg angles below this (radians) use a ratio factor of exactly 1.
pub const MIN_CURVATURE_EPSILON: f64 = 1e-9;

// ============================================================================
// Geophysics
// ============================================================================

/// Converts transit time in µs per unit length to velocity in units per second.
pub const SONIC_TO_VELOCITY: f64 = 1.0e6;

/// Gardner coefficient `a` in `rho = a * V^b` (imperial: V in ft/s, rho in g/cc).
pub const GARDNER_COEFFICIENT: f64 = 0.23;

/// Gardner exponent `b`.
pub const GARDNER_EXPONENT: f64 = 0.25;

/// Impedance sums below this are treated as zero (reflection coefficient 0).
pub const IMPEDANCE_SUM_EPSILON: f64 = 1e-12;

/// Reflection coefficient magnitude above which contrasts count as strong.
pub const STRONG_CONTRAST_RC: f64 = 0.1;

/// Upper bound on wavelet taps (`duration / sample interval`).
pub const MAX_WAVELET_SAMPLES: usize = 4096;

/// Lateral trace count of the schematic section.
pub const DEFAULT_LATERAL_COUNT: usize = 50;

/// Samples kept per output series after display decimation.
pub const DISPLAY_MAX_POINTS: usize = 500;

// ============================================================================
// Log Loading
// ============================================================================

/// Null marker used by LAS files that do not declare one.
pub const LAS_DEFAULT_NULL: f64 = -999.25;
