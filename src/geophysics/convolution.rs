//! Same-length convolution of reflectivity with a wavelet
//!
//! Each reflection coefficient `r[i]` stamps the wavelet onto the output
//! with the wavelet's center aligned on `i`: tap `j` lands at
//! `i + j − center`. Taps falling outside `[0, len)` are dropped, so the
//! output always has the reflectivity's length.

use tracing::debug;

use crate::error::GeoError;
use crate::types::{ImpedanceSample, ReflectivitySample, SyntheticTrace, Wavelet};

fn stamp(out: &mut [f64], i: usize, r: f64, taps: &[f64], center: usize) {
    let len = out.len() as isize;
    let offset = i as isize - center as isize;
    for (j, &w) in taps.iter().enumerate() {
        let k = offset + j as isize;
        if (0..len).contains(&k) {
            out[k as usize] += r * w;
        }
    }
}

/// Exact "same"-mode convolution.
pub fn convolve(reflectivity: &[f64], wavelet: &Wavelet) -> Vec<f64> {
    let mut out = vec![0.0; reflectivity.len()];
    for (i, &r) in reflectivity.iter().enumerate() {
        stamp(&mut out, i, r, &wavelet.amplitudes, wavelet.center);
    }
    out
}

/// Convolution that skips coefficients with `|r| < threshold`.
///
/// Differs from [`convolve`] by at most `threshold · Σ|w|` per skipped
/// coefficient; missing (NaN) coefficients are skipped as well.
pub fn convolve_sparse(reflectivity: &[f64], wavelet: &Wavelet, threshold: f64) -> Vec<f64> {
    let mut out = vec![0.0; reflectivity.len()];
    let mut stamped = 0usize;
    for (i, &r) in reflectivity.iter().enumerate() {
        if r.is_nan() || r.abs() < threshold {
            continue;
        }
        stamp(&mut out, i, r, &wavelet.amplitudes, wavelet.center);
        stamped += 1;
    }
    debug!(
        samples = reflectivity.len(),
        stamped,
        taps = wavelet.len(),
        "Sparse convolution"
    );
    out
}

/// Scale a trace into [-1, 1] by its largest absolute amplitude.
///
/// Returns the scaled trace and the peak it was divided by. An all-zero
/// trace is divided by 1 and stays all zero.
pub fn normalize(trace: &[f64]) -> (Vec<f64>, f64) {
    let peak = trace.iter().fold(0.0_f64, |m, &x| m.max(x.abs()));
    let divisor = if peak > 0.0 { peak } else { 1.0 };
    (trace.iter().map(|&x| x / divisor).collect(), peak)
}

/// Convolve, normalise, and attach the depth and time axes.
///
/// `reflectivity` and `impedance` must be the same length (reflectivity is
/// computed one-per-impedance-sample).
pub fn synthetic_trace(
    reflectivity: &[ReflectivitySample],
    impedance: &[ImpedanceSample],
    wavelet: &Wavelet,
    skip_threshold: f64,
) -> Result<SyntheticTrace, GeoError> {
    if reflectivity.len() != impedance.len() {
        return Err(GeoError::LengthMismatch {
            what: "reflectivity/impedance",
            expected: impedance.len(),
            found: reflectivity.len(),
        });
    }
    let rc: Vec<f64> = reflectivity.iter().map(|r| r.coefficient).collect();
    let raw = convolve_sparse(&rc, wavelet, skip_threshold);
    let (amplitudes, peak_amplitude) = normalize(&raw);

    Ok(SyntheticTrace {
        depths: reflectivity.iter().map(|r| r.depth).collect(),
        twt_s: impedance.iter().map(|s| s.twt_s).collect(),
        amplitudes,
        peak_amplitude,
    })
}
