//! Ricker (Mexican-hat) wavelet synthesis
//!
//! `f(t) = (1 − 2π²f²t²) · exp(−π²f²t²)`, sampled at `t = (i − center) · dt`
//! for `i in 0..n`, `n = duration / dt`, `center = n / 2`.

use tracing::debug;

use crate::config::defaults::MAX_WAVELET_SAMPLES;
use crate::error::GeoError;
use crate::types::{Polarity, Wavelet};

/// Ricker amplitude at time `t` (s) for dominant frequency `frequency_hz`.
pub fn ricker_amplitude(frequency_hz: f64, t: f64) -> f64 {
    let a = (std::f64::consts::PI * frequency_hz * t).powi(2);
    (1.0 - 2.0 * a) * (-a).exp()
}

fn check_positive(name: &'static str, value: f64) -> Result<(), GeoError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeoError::InvalidParameter {
            name,
            value,
            reason: "must be finite and > 0",
        })
    }
}

/// Sample a zero-phase Ricker wavelet.
///
/// The center sample sits at t = 0 and carries the peak (+1 for normal
/// polarity, −1 reversed). Samples `center − k` and `center + k` are
/// mirror images.
pub fn ricker_wavelet(
    frequency_hz: f64,
    sample_interval_s: f64,
    duration_s: f64,
    polarity: Polarity,
) -> Result<Wavelet, GeoError> {
    check_positive("wavelet_frequency_hz", frequency_hz)?;
    check_positive("sample_interval_s", sample_interval_s)?;
    check_positive("wavelet_duration_s", duration_s)?;

    // Rounded so 0.1 / 0.002 gives 50 samples despite binary representation
    let n = (duration_s / sample_interval_s).round();
    if n < 1.0 {
        return Err(GeoError::InvalidParameter {
            name: "wavelet_duration_s",
            value: duration_s,
            reason: "shorter than one sample interval",
        });
    }
    if n > MAX_WAVELET_SAMPLES as f64 {
        return Err(GeoError::InvalidParameter {
            name: "sample_interval_s",
            value: sample_interval_s,
            reason: "wavelet would exceed the maximum sample count",
        });
    }
    let n = n as usize;
    let center = n / 2;

    let sign = match polarity {
        Polarity::Normal => 1.0,
        Polarity::Reverse => -1.0,
    };
    let amplitudes: Vec<f64> = (0..n)
        .map(|i| {
            let t = (i as f64 - center as f64) * sample_interval_s;
            sign * ricker_amplitude(frequency_hz, t)
        })
        .collect();

    debug!(samples = n, center, frequency_hz, "Ricker wavelet generated");

    Ok(Wavelet {
        amplitudes,
        center,
        frequency_hz,
        sample_interval_s,
        polarity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_25hz_peak_at_center_and_symmetric() {
        let w = ricker_wavelet(25.0, 0.002, 0.1, Polarity::Normal).unwrap();
        assert_eq!(w.len(), 50);
        assert_eq!(w.center, 25);
        assert_eq!(w.amplitudes[w.center], 1.0);

        let peak = w
            .amplitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, w.center);

        for k in 1..=w.center {
            if w.center + k >= w.len() {
                break;
            }
            assert_eq!(w.amplitudes[w.center - k], w.amplitudes[w.center + k], "k={k}");
        }
    }

    #[test]
    fn test_odd_length_fully_symmetric() {
        let w = ricker_wavelet(30.0, 0.004, 0.1, Polarity::Normal).unwrap();
        assert_eq!(w.len(), 25);
        assert_eq!(w.center, 12);
        for k in 1..=12 {
            assert_eq!(w.amplitudes[12 - k], w.amplitudes[12 + k]);
        }
    }

    #[test]
    fn test_side_lobes_negative() {
        // Zero crossings at t = ±1 / (π f √2); beyond them the wavelet dips below 0
        let f = 30.0;
        let t_zero = 1.0 / (std::f64::consts::PI * f * 2f64.sqrt());
        assert!(ricker_amplitude(f, t_zero).abs() < 1e-12);
        assert!(ricker_amplitude(f, 1.5 * t_zero) < 0.0);
    }

    #[test]
    fn test_reverse_polarity_negates() {
        let normal = ricker_wavelet(30.0, 0.002, 0.1, Polarity::Normal).unwrap();
        let reverse = ricker_wavelet(30.0, 0.002, 0.1, Polarity::Reverse).unwrap();
        for (a, b) in normal.amplitudes.iter().zip(&reverse.amplitudes) {
            assert_eq!(*a, -*b);
        }
        assert_eq!(reverse.amplitudes[reverse.center], -1.0);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(ricker_wavelet(0.0, 0.002, 0.1, Polarity::Normal).is_err());
        assert!(ricker_wavelet(30.0, -0.002, 0.1, Polarity::Normal).is_err());
        assert!(ricker_wavelet(30.0, 0.002, f64::NAN, Polarity::Normal).is_err());
        assert!(matches!(
            ricker_wavelet(30.0, 0.01, 0.001, Polarity::Normal),
            Err(GeoError::InvalidParameter { name: "wavelet_duration_s", .. })
        ));
    }

    #[test]
    fn test_sample_count_capped() {
        assert!(matches!(
            ricker_wavelet(30.0, 1e-13, 1.0, Polarity::Normal),
            Err(GeoError::InvalidParameter { name: "sample_interval_s", .. })
        ));
        let w = ricker_wavelet(30.0, 0.001, 4.096, Polarity::Normal).unwrap();
        assert_eq!(w.amplitudes.len(), MAX_WAVELET_SAMPLES);
    }
}
