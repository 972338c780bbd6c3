//! Depth-indexed log curve types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::GeoError;

/// Depth tolerance when checking that two curves share an index (ft or m).
const DEPTH_MATCH_TOLERANCE: f64 = 1e-6;

/// One depth-indexed log reading. `value` is NaN for a missing sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSample {
    pub depth: f64,
    pub value: f64,
}

impl CurveSample {
    pub const fn new(depth: f64, value: f64) -> Self {
        Self { depth, value }
    }

    /// A sample is usable when both depth and value are finite.
    pub fn is_valid(&self) -> bool {
        self.depth.is_finite() && self.value.is_finite()
    }
}

/// An ordered (depth, value) series, depth strictly increasing.
///
/// Owned by the loading side; the engine only reads it. Missing samples are
/// kept as NaN so consumers can skip them explicitly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogCurve {
    /// Mnemonic as it appeared in the source file (e.g. "DTCO")
    pub mnemonic: String,
    /// Unit string as declared by the source, empty when unknown
    #[serde(default)]
    pub unit: String,
    pub samples: Vec<CurveSample>,
}

impl LogCurve {
    /// The explicitly-empty curve returned when nothing resolves.
    pub const fn empty() -> Self {
        Self {
            mnemonic: String::new(),
            unit: String::new(),
            samples: Vec::new(),
        }
    }

    pub fn new(mnemonic: impl Into<String>, samples: Vec<CurveSample>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            unit: String::new(),
            samples,
        }
    }

    /// Build a curve from parallel depth and value slices.
    pub fn from_columns(
        mnemonic: impl Into<String>,
        depths: &[f64],
        values: &[f64],
    ) -> Result<Self, GeoError> {
        if depths.len() != values.len() {
            return Err(GeoError::LengthMismatch {
                what: "curve depth/value columns",
                expected: depths.len(),
                found: values.len(),
            });
        }
        let samples = depths
            .iter()
            .zip(values)
            .map(|(&d, &v)| CurveSample::new(d, v))
            .collect();
        Ok(Self::new(mnemonic, samples))
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn depths(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.depth).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Samples with finite depth and value, in order.
    pub fn valid_samples(&self) -> impl Iterator<Item = &CurveSample> + '_ {
        self.samples.iter().filter(|s| s.is_valid())
    }

    pub fn valid_count(&self) -> usize {
        self.valid_samples().count()
    }

    /// Values of this curve laid out on `reference`'s depth index.
    ///
    /// Both curves must come from the same depth index: sample `i` of this
    /// curve has to sit at the same depth as sample `i` of the reference.
    /// A shorter curve is padded with NaN past its end.
    pub fn align_to(&self, reference: &Self) -> Result<Vec<f64>, GeoError> {
        let mut aligned = Vec::with_capacity(reference.len());
        for (index, anchor) in reference.samples.iter().enumerate() {
            match self.samples.get(index) {
                Some(sample) => {
                    if (sample.depth - anchor.depth).abs() > DEPTH_MATCH_TOLERANCE {
                        return Err(GeoError::CurveMisaligned {
                            curve: self.mnemonic.clone(),
                            index,
                            expected_depth: anchor.depth,
                            found_depth: sample.depth,
                        });
                    }
                    aligned.push(sample.value);
                }
                None => aligned.push(f64::NAN),
            }
        }
        Ok(aligned)
    }
}

/// Identification metadata from the log header. Used for labels only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellHeader {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub service_company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: String,
}

/// Named curves of one well, keyed by source mnemonic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveSet {
    #[serde(default)]
    pub header: WellHeader,
    pub curves: BTreeMap<String, LogCurve>,
}

impl CurveSet {
    pub fn new(header: WellHeader) -> Self {
        Self {
            header,
            curves: BTreeMap::new(),
        }
    }

    /// Insert a curve under its own mnemonic, replacing any previous one.
    pub fn insert(&mut self, curve: LogCurve) {
        self.curves.insert(curve.mnemonic.clone(), curve);
    }

    pub fn get(&self, name: &str) -> Option<&LogCurve> {
        self.curves.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.curves.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
