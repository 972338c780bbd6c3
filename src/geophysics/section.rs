//! Schematic 2D section by lateral replication of one trace
//!
//! Display artifact only. The center column is the true synthetic trace;
//! every other column is a perturbed copy. The result is labelled as
//! schematic at the output boundary.

use rand::Rng;
use tracing::debug;

use crate::config::{PerturbationKind, SectionConfig};
use crate::types::{SeismicSection, SyntheticTrace, SECTION_LABEL};

/// Circular shift (samples) applied to lateral trace `index` of `count`.
///
/// Zero at the center index.
pub fn lateral_shift(index: usize, count: usize, max_shift: usize) -> isize {
    if count == 0 || index == count / 2 {
        return 0;
    }
    let phase = std::f64::consts::TAU * index as f64 / count as f64;
    (max_shift as f64 * phase.sin()).round() as isize
}

fn shifted(trace: &[f64], shift: isize) -> Vec<f64> {
    let mut out = trace.to_vec();
    if out.is_empty() {
        return out;
    }
    let k = shift.unsigned_abs() % out.len();
    if shift >= 0 {
        out.rotate_right(k);
    } else {
        out.rotate_left(k);
    }
    out
}

fn jittered<R: Rng>(trace: &[f64], amplitude: f64, rng: &mut R) -> Vec<f64> {
    trace
        .iter()
        .map(|&x| x + (rng.gen::<f64>() - 0.5) * amplitude)
        .collect()
}

/// Replicate `trace` across `config.lateral_count` columns.
///
/// Jitter draws every sample independently from `rng`, so a seeded
/// `StdRng` reproduces the section exactly.
pub fn build_section<R: Rng>(trace: &SyntheticTrace, config: &SectionConfig, rng: &mut R) -> SeismicSection {
    let count = config.lateral_count.max(1);
    let center_index = count / 2;

    let traces: Vec<Vec<f64>> = (0..count)
        .map(|i| {
            if i == center_index {
                return trace.amplitudes.clone();
            }
            match config.perturbation {
                PerturbationKind::Jitter => jittered(&trace.amplitudes, config.jitter_amplitude, rng),
                PerturbationKind::Shift => shifted(
                    &trace.amplitudes,
                    lateral_shift(i, count, config.max_shift),
                ),
            }
        })
        .collect();

    debug!(
        lateral_count = count,
        samples = trace.len(),
        perturbation = ?config.perturbation,
        "Schematic section built"
    );

    SeismicSection {
        label: SECTION_LABEL.to_string(),
        schematic: true,
        depths: trace.depths.clone(),
        traces,
        center_index,
    }
}
