//! Engine Configuration - every tunable of the geometry and geophysics engine
//!
//! Each struct implements `Default` with the values the engine ships with,
//! so an empty or missing config file behaves exactly like the built-ins.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::types::{Polarity, ProjectionMethod, RiskBand};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `EngineConfig::load()` which searches:
/// 1. `$WELLGEO_CONFIG` env var
/// 2. `./wellgeo.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Well labels used when the log header has none
    #[serde(default)]
    pub well: WellLabels,

    /// DLS risk band cut points
    #[serde(default)]
    pub risk: RiskThresholds,

    /// Trajectory integration
    #[serde(default)]
    pub trajectory: TrajectoryConfig,

    /// Wavelet and convolution
    #[serde(default)]
    pub seismic: SeismicConfig,

    /// Schematic 2D section
    #[serde(default)]
    pub section: SectionConfig,

    /// Extra curve aliases
    #[serde(default)]
    pub curves: CurveAliasConfig,
}

impl EngineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$WELLGEO_CONFIG` environment variable
    /// 2. `./wellgeo.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded engine config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./wellgeo.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded engine config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are reported as warnings and never fail the parse.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Engine config saved");
        Ok(())
    }

    /// Validate all settings for internal consistency.
    ///
    /// Rules:
    /// - DLS cut points must be finite, positive, and strictly ascending
    /// - Synthetic profile parameters must describe a buildable well
    /// - Wavelet sampling must produce at least one sample
    /// - Section must have at least one lateral trace
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        // Risk bands: medium < high < critical
        let r = &self.risk;
        Self::check_ascending(r.medium_dls, r.high_dls, "risk.medium_dls/high_dls", &mut errors);
        Self::check_ascending(r.high_dls, r.critical_dls, "risk.high_dls/critical_dls", &mut errors);
        if r.medium_dls <= 0.0 {
            errors.push(format!("risk.medium_dls ({:.2}) must be > 0", r.medium_dls));
        }
        if r.report.min_reported_dls < 0.0 {
            errors.push("risk.report.min_reported_dls must be >= 0".to_string());
        }

        // Trajectory
        let t = &self.trajectory;
        if t.stride == 0 {
            errors.push("trajectory.stride must be >= 1".to_string());
        }
        let s = &t.synthetic;
        if !(0.0..1.0).contains(&s.kickoff_fraction) {
            errors.push(format!(
                "trajectory.synthetic.kickoff_fraction ({:.2}) must be in [0, 1)",
                s.kickoff_fraction
            ));
        }
        if s.build_rate_deg_per_100 <= 0.0 {
            errors.push("trajectory.synthetic.build_rate_deg_per_100 must be > 0".to_string());
        }
        if s.max_inclination_deg <= 0.0 || s.max_inclination_deg > 180.0 {
            errors.push(format!(
                "trajectory.synthetic.max_inclination_deg ({:.1}) must be in (0, 180]",
                s.max_inclination_deg
            ));
        }
        if !(0.0..360.0).contains(&s.azimuth_deg) {
            errors.push(format!(
                "trajectory.synthetic.azimuth_deg ({:.1}) must be in [0, 360)",
                s.azimuth_deg
            ));
        }

        // Seismic: divisors must be positive
        let w = &self.seismic;
        if w.wavelet_frequency_hz <= 0.0 {
            errors.push("seismic.wavelet_frequency_hz must be > 0".to_string());
        }
        if w.sample_interval_s <= 0.0 {
            errors.push("seismic.sample_interval_s must be > 0".to_string());
        }
        if w.wavelet_duration_s < w.sample_interval_s {
            errors.push(format!(
                "seismic.wavelet_duration_s ({}) must be >= sample_interval_s ({})",
                w.wavelet_duration_s, w.sample_interval_s
            ));
        }
        if w.sample_interval_s > 0.0
            && (w.wavelet_duration_s / w.sample_interval_s).round()
                > defaults::MAX_WAVELET_SAMPLES as f64
        {
            errors.push(format!(
                "seismic.wavelet_duration_s / sample_interval_s must not exceed {} samples",
                defaults::MAX_WAVELET_SAMPLES
            ));
        }
        if w.skip_threshold < 0.0 {
            errors.push("seismic.skip_threshold must be >= 0".to_string());
        }

        // Section
        let sec = &self.section;
        if sec.lateral_count == 0 {
            errors.push("section.lateral_count must be >= 1".to_string());
        }
        if sec.jitter_amplitude < 0.0 {
            errors.push("section.jitter_amplitude must be >= 0".to_string());
        }

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        // Reject NaN/Inf in any config value (sweep all f64 fields via serialization)
        if let Ok(value) = toml::Value::try_from(self) {
            for key in super::validation::non_finite_keys(&value, "") {
                errors.push(format!("{key} must be a finite number"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_ascending(lower: f64, upper: f64, name: &str, errors: &mut Vec<String>) {
        // NaN/Inf comparisons silently pass, catch them explicitly
        if !lower.is_finite() || !upper.is_finite() {
            errors.push(format!(
                "{name}: values must be finite (got {lower}, {upper})"
            ));
            return;
        }
        if upper <= lower {
            errors.push(format!(
                "{name}: upper cut point ({upper:.3}) must be > lower ({lower:.3})"
            ));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            Self::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            Self::Serialize(e) => write!(f, "Config serialization error: {e}"),
            Self::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Well Labels
// ============================================================================

/// Fallback identification, used only when the log header is blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellLabels {
    #[serde(default = "default_well_name")]
    pub name: String,

    #[serde(default)]
    pub field: String,

    #[serde(default)]
    pub operator: String,
}

fn default_well_name() -> String {
    "DEFAULT".to_string()
}

impl Default for WellLabels {
    fn default() -> Self {
        Self {
            name: default_well_name(),
            field: String::new(),
            operator: String::new(),
        }
    }
}

// ============================================================================
// DLS Risk Thresholds
// ============================================================================

/// Cut points (deg/100) separating the four DLS risk bands.
///
/// Earlier tooling disagreed on where drilling risk starts (3 deg/100 in one
/// place, 10 deg/100 in another). The defaults keep both numbers as band
/// edges with 6 deg/100 in between; operators should set their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// DLS at or above this is Medium
    #[serde(default = "default_medium_dls")]
    pub medium_dls: f64,

    /// DLS at or above this is High
    #[serde(default = "default_high_dls")]
    pub high_dls: f64,

    /// DLS at or above this is Critical
    #[serde(default = "default_critical_dls")]
    pub critical_dls: f64,

    #[serde(default)]
    pub report: RiskReportConfig,
}

fn default_medium_dls() -> f64 { 3.0 }
fn default_high_dls() -> f64 { 6.0 }
fn default_critical_dls() -> f64 { 10.0 }

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium_dls: default_medium_dls(),
            high_dls: default_high_dls(),
            critical_dls: default_critical_dls(),
            report: RiskReportConfig::default(),
        }
    }
}

impl RiskThresholds {
    /// Build a threshold set without a report section.
    pub fn new(medium_dls: f64, high_dls: f64, critical_dls: f64) -> Self {
        Self {
            medium_dls,
            high_dls,
            critical_dls,
            report: RiskReportConfig::default(),
        }
    }

    /// Map a DLS value (deg/100) onto its band.
    pub fn classify(&self, dls: f64) -> RiskBand {
        if dls >= self.critical_dls {
            RiskBand::Critical
        } else if dls >= self.high_dls {
            RiskBand::High
        } else if dls >= self.medium_dls {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }
}

/// Drilling-risk report shaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReportConfig {
    /// Intervals below this DLS are left out of the report (deg/100)
    #[serde(default = "default_min_reported_dls")]
    pub min_reported_dls: f64,

    /// Keep only the most severe N intervals
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_min_reported_dls() -> f64 { 1.0 }
fn default_max_entries() -> usize { 50 }

impl Default for RiskReportConfig {
    fn default() -> Self {
        Self {
            min_reported_dls: default_min_reported_dls(),
            max_entries: default_max_entries(),
        }
    }
}

// ============================================================================
// Trajectory
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    /// Use every Nth station (first and last always kept)
    #[serde(default = "default_stride")]
    pub stride: usize,

    #[serde(default)]
    pub method: ProjectionMethod,

    /// Schematic build profile used when no survey curves exist
    #[serde(default)]
    pub synthetic: SyntheticProfileConfig,
}

fn default_stride() -> usize { 1 }

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            stride: default_stride(),
            method: ProjectionMethod::default(),
            synthetic: SyntheticProfileConfig::default(),
        }
    }
}

/// Build-and-hold profile fabricated from depth alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticProfileConfig {
    /// Kick-off point as a fraction of the logged interval
    #[serde(default = "default_kickoff_fraction")]
    pub kickoff_fraction: f64,

    /// Inclination build rate below kick-off (deg/100)
    #[serde(default = "default_build_rate")]
    pub build_rate_deg_per_100: f64,

    /// Inclination is held once it reaches this angle (deg)
    #[serde(default = "default_max_inclination")]
    pub max_inclination_deg: f64,

    /// Constant azimuth of the profile (deg)
    #[serde(default)]
    pub azimuth_deg: f64,
}

fn default_kickoff_fraction() -> f64 { 0.3 }
fn default_build_rate() -> f64 { 2.0 }
fn default_max_inclination() -> f64 { 60.0 }

impl Default for SyntheticProfileConfig {
    fn default() -> Self {
        Self {
            kickoff_fraction: default_kickoff_fraction(),
            build_rate_deg_per_100: default_build_rate(),
            max_inclination_deg: default_max_inclination(),
            azimuth_deg: 0.0,
        }
    }
}

// ============================================================================
// Seismic
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicConfig {
    /// Ricker dominant frequency (Hz)
    #[serde(default = "default_wavelet_frequency")]
    pub wavelet_frequency_hz: f64,

    /// Wavelet sample interval (s)
    #[serde(default = "default_sample_interval")]
    pub sample_interval_s: f64,

    /// Total wavelet length (s)
    #[serde(default = "default_wavelet_duration")]
    pub wavelet_duration_s: f64,

    #[serde(default)]
    pub polarity: Polarity,

    /// Reflection coefficients smaller than this skip the convolution inner loop
    #[serde(default = "default_skip_threshold")]
    pub skip_threshold: f64,
}

fn default_wavelet_frequency() -> f64 { 30.0 }
fn default_sample_interval() -> f64 { 0.002 }
fn default_wavelet_duration() -> f64 { 0.1 }
fn default_skip_threshold() -> f64 { 1e-4 }

impl Default for SeismicConfig {
    fn default() -> Self {
        Self {
            wavelet_frequency_hz: default_wavelet_frequency(),
            sample_interval_s: default_sample_interval(),
            wavelet_duration_s: default_wavelet_duration(),
            polarity: Polarity::default(),
            skip_threshold: default_skip_threshold(),
        }
    }
}

// ============================================================================
// Section
// ============================================================================

/// How side traces of the schematic section differ from the center trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerturbationKind {
    /// Independent bounded random noise per sample
    #[default]
    Jitter,
    /// Sinusoidal circular shift per trace
    Shift,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Number of lateral traces
    #[serde(default = "default_lateral_count")]
    pub lateral_count: usize,

    #[serde(default)]
    pub perturbation: PerturbationKind,

    /// Peak-to-peak jitter added to side traces (normalised amplitude units)
    #[serde(default = "default_jitter_amplitude")]
    pub jitter_amplitude: f64,

    /// Largest circular shift for `perturbation = "shift"` (samples)
    #[serde(default = "default_max_shift")]
    pub max_shift: usize,

    /// Pin the jitter RNG for reproducible sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_lateral_count() -> usize { defaults::DEFAULT_LATERAL_COUNT }
fn default_jitter_amplitude() -> f64 { 0.1 }
fn default_max_shift() -> usize { 5 }

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            lateral_count: default_lateral_count(),
            perturbation: PerturbationKind::default(),
            jitter_amplitude: default_jitter_amplitude(),
            max_shift: default_max_shift(),
            seed: None,
        }
    }
}

// ============================================================================
// Curve Aliases
// ============================================================================

/// Site-specific mnemonics appended after the built-in alias table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveAliasConfig {
    #[serde(default)]
    pub depth: Vec<String>,
    #[serde(default)]
    pub inclination: Vec<String>,
    #[serde(default)]
    pub azimuth: Vec<String>,
    #[serde(default)]
    pub sonic: Vec<String>,
    #[serde(default)]
    pub density: Vec<String>,
    #[serde(default)]
    pub gamma_ray: Vec<String>,
}
