//! Impedance, reflectivity, wavelet, and synthetic trace types
//!
//! Unit convention end-to-end: sonic transit time in µs per unit length
//! (µs/ft for imperial logs), so velocity comes out in length units per
//! second and Gardner density in g/cc.

use serde::{Deserialize, Serialize};

/// Label attached to every schematic section at the output boundary.
pub const SECTION_LABEL: &str =
    "Schematic lateral replication of a single synthetic trace; not a geophysical cross-section";

/// Acoustic properties at one sonic sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpedanceSample {
    pub depth: f64,
    /// Sonic transit time (µs per unit length)
    pub transit_time: f64,
    /// Compressional velocity (length units per second)
    pub velocity: f64,
    /// Bulk density (g/cc)
    pub density: f64,
    /// True when density came from Gardner's relation rather than the log
    pub density_estimated: bool,
    /// Acoustic impedance, velocity × density
    pub impedance: f64,
    /// Accumulated two-way travel time from the first sample (s)
    pub twt_s: f64,
}

/// Normal-incidence reflection coefficient at the top of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReflectivitySample {
    pub depth: f64,
    pub coefficient: f64,
}

/// Where the densities behind an impedance log came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensitySource {
    /// Every sample used the density log
    Measured,
    /// Every sample used Gardner's relation (estimated, not measured)
    Estimated,
    /// Some samples measured, some estimated
    Mixed,
}

impl DensitySource {
    pub const fn report_note(self) -> &'static str {
        match self {
            Self::Measured => "density measured (RHOB)",
            Self::Estimated => "density estimated via Gardner, not measured",
            Self::Mixed => "density partly estimated via Gardner, not fully measured",
        }
    }
}

/// Wavelet polarity convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Positive peak for an impedance increase
    #[default]
    Normal,
    /// Negated wavelet (European convention)
    Reverse,
}

/// A sampled zero-phase wavelet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wavelet {
    pub amplitudes: Vec<f64>,
    /// Index of the t = 0 sample
    pub center: usize,
    pub frequency_hz: f64,
    pub sample_interval_s: f64,
    pub polarity: Polarity,
}

impl Wavelet {
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Time of each sample relative to the center (s).
    pub fn times(&self) -> Vec<f64> {
        (0..self.amplitudes.len())
            .map(|i| (i as f64 - self.center as f64) * self.sample_interval_s)
            .collect()
    }
}

/// Normalised synthetic seismogram on the reflectivity depth index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticTrace {
    pub depths: Vec<f64>,
    pub twt_s: Vec<f64>,
    /// Amplitudes in [-1, 1]
    pub amplitudes: Vec<f64>,
    /// max |amplitude| before normalisation (0 for an all-zero trace)
    pub peak_amplitude: f64,
}

impl SyntheticTrace {
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }
}

/// Schematic 2D display built by replicating one trace laterally.
///
/// The center trace is the true synthetic; all others are perturbed copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicSection {
    pub label: String,
    pub schematic: bool,
    pub depths: Vec<f64>,
    /// One trace per lateral index
    pub traces: Vec<Vec<f64>>,
    pub center_index: usize,
}

impl SeismicSection {
    pub fn lateral_count(&self) -> usize {
        self.traces.len()
    }

    pub fn center_trace(&self) -> Option<&[f64]> {
        self.traces.get(self.center_index).map(Vec::as_slice)
    }
}
