//! Synthetic geophysics: impedance, reflectivity, wavelet, convolution, section
//!
//! ## Data Flow
//!
//! ```text
//! depth + DT (+ RHOB) ──► acoustic_impedance ──► reflectivity ──┐
//!                                                               ├──► synthetic_trace ──► build_section
//! SeismicConfig ──────► ricker_wavelet ─────────────────────────┘
//! ```

pub mod convolution;
pub mod impedance;
pub mod section;
pub mod wavelet;

pub use convolution::{convolve, convolve_sparse, normalize, synthetic_trace};
pub use impedance::{
    acoustic_impedance, density_source, gardner_density, reflectivity, sonic_velocity,
    ImpedanceSummary,
};
pub use section::{build_section, lateral_shift};
pub use wavelet::{ricker_amplitude, ricker_wavelet};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{SectionConfig, SeismicConfig};
use crate::error::GeoError;
use crate::types::{ImpedanceSample, ReflectivitySample, SeismicSection, SyntheticTrace, Wavelet};

/// Everything the well-tie and section displays consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicProducts {
    pub impedance: Vec<ImpedanceSample>,
    pub reflectivity: Vec<ReflectivitySample>,
    pub wavelet: Wavelet,
    pub trace: SyntheticTrace,
    pub section: SeismicSection,
    pub summary: ImpedanceSummary,
}

fn every_nth<T: Clone>(values: &[T], step: usize) -> Vec<T> {
    values.iter().step_by(step).cloned().collect()
}

impl SeismicProducts {
    /// Thin every depth-indexed series to at most about `max_points` samples.
    ///
    /// Keeps every `max(1, len / max_points)`-th sample. The wavelet and the
    /// summary are left untouched; they were computed at full resolution.
    pub fn decimated(&self, max_points: usize) -> Self {
        let len = self.trace.len();
        let step = if max_points == 0 { 1 } else { (len / max_points).max(1) };
        if step == 1 {
            return self.clone();
        }
        Self {
            impedance: every_nth(&self.impedance, step),
            reflectivity: every_nth(&self.reflectivity, step),
            wavelet: self.wavelet.clone(),
            trace: SyntheticTrace {
                depths: every_nth(&self.trace.depths, step),
                twt_s: every_nth(&self.trace.twt_s, step),
                amplitudes: every_nth(&self.trace.amplitudes, step),
                peak_amplitude: self.trace.peak_amplitude,
            },
            section: SeismicSection {
                label: self.section.label.clone(),
                schematic: self.section.schematic,
                depths: every_nth(&self.section.depths, step),
                traces: self.section.traces.iter().map(|t| every_nth(t, step)).collect(),
                center_index: self.section.center_index,
            },
            summary: self.summary,
        }
    }
}

/// Run the whole seismic branch on one sonic-indexed series.
pub fn seismic_products<R: Rng>(
    depth: &[f64],
    sonic: &[f64],
    density: Option<&[f64]>,
    seismic: &SeismicConfig,
    section: &SectionConfig,
    rng: &mut R,
) -> Result<SeismicProducts, GeoError> {
    let impedance = acoustic_impedance(depth, sonic, density)?;
    let reflectivity = reflectivity(&impedance);
    let wavelet = ricker_wavelet(
        seismic.wavelet_frequency_hz,
        seismic.sample_interval_s,
        seismic.wavelet_duration_s,
        seismic.polarity,
    )?;
    let trace = synthetic_trace(&reflectivity, &impedance, &wavelet, seismic.skip_threshold)?;
    let section = build_section(&trace, section, rng);
    let summary = ImpedanceSummary::from_logs(&impedance, &reflectivity);

    info!(
        samples = trace.len(),
        wavelet_taps = wavelet.len(),
        lateral_count = section.lateral_count(),
        density = summary.density_source.report_note(),
        strong_contrasts = summary.strong_contrasts,
        "Synthetic seismogram complete"
    );

    Ok(SeismicProducts {
        impedance,
        reflectivity,
        wavelet,
        trace,
        section,
        summary,
    })
}
