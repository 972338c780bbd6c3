//! Log file readers producing a `CurveSet`
//!
//! The engine never touches files itself; these readers sit in front of it
//! for the CLI and tests.
//!
//! - LAS 2.0, unwrapped (`~V`, `~W`, `~C`, `~A`; `NULL` becomes NaN)
//! - CSV with a header row of mnemonics, depth in the first column
//!
//! Both formats take the first column as the depth index. Rows whose depth
//! is missing or does not increase are dropped so every curve keeps a
//! strictly increasing index.

pub mod csv;
pub mod las;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::types::{CurveSample, CurveSet, LogCurve, WellHeader};

pub use self::csv::parse_csv_str;
pub use self::las::parse_las_str;

#[derive(Error, Debug)]
pub enum LogReadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing {0} section")]
    MissingSection(&'static str),

    #[error("Unsupported log feature: {0}")]
    Unsupported(String),

    #[error("Line {line}: expected {expected} values, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: cannot parse '{token}' as a number")]
    InvalidNumber { line: usize, token: String },

    #[error("No curves declared")]
    NoCurves,

    #[error("No data rows with a usable depth")]
    NoData,
}

/// Curve declaration: mnemonic and unit.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ColumnDef {
    pub mnemonic: String,
    pub unit: String,
}

/// Load a LAS (`.las`) or CSV (anything else) file.
pub fn load_log(path: &Path) -> Result<CurveSet, LogReadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LogReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_las = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("las"));

    let mut set = if is_las {
        parse_las_str(&text)?
    } else {
        parse_csv_str(&text)?
    };

    if set.header.name.is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            set.header.name = stem.to_string();
        }
    }

    info!(
        file = %path.display(),
        well = %set.header.name,
        curves = set.len(),
        kind = if is_las { "LAS" } else { "CSV" },
        "Log loaded"
    );
    Ok(set)
}

/// Turn parsed rows into curves keyed by mnemonic.
///
/// Column 0 is the depth index and is itself stored as a curve.
pub(crate) fn assemble(
    header: WellHeader,
    columns: &[ColumnDef],
    rows: &[Vec<f64>],
) -> Result<CurveSet, LogReadError> {
    if columns.is_empty() {
        return Err(LogReadError::NoCurves);
    }

    let mut kept: Vec<&Vec<f64>> = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;
    for row in rows {
        let depth = row[0];
        let increasing = kept.last().map_or(true, |prev| depth > prev[0]);
        if depth.is_finite() && increasing {
            kept.push(row);
        } else {
            dropped += 1;
        }
    }
    if kept.is_empty() {
        return Err(LogReadError::NoData);
    }
    if dropped > 0 {
        warn!(dropped, kept = kept.len(), "Dropped rows with missing or non-increasing depth");
    }

    let mut set = CurveSet::new(header);
    for (col, def) in columns.iter().enumerate() {
        let samples = kept
            .iter()
            .map(|row| CurveSample::new(row[0], row[col]))
            .collect();
        set.insert(LogCurve::new(def.mnemonic.clone(), samples).with_unit(def.unit.clone()));
    }
    Ok(set)
}
