//! CSV log reader
//!
//! First row holds the curve mnemonics, optionally with a unit in
//! parentheses (`DT(us/ft)`). First column is depth. Empty, `NaN`, `NULL`,
//! `-` and the LAS null value all read as a missing sample.

use tracing::debug;

use crate::config::defaults::LAS_DEFAULT_NULL;
use crate::types::{CurveSet, WellHeader};

use super::{assemble, ColumnDef, LogReadError};

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

fn column_def(cell: &str) -> ColumnDef {
    let cell = cell.trim();
    match cell.split_once('(') {
        Some((name, unit)) if unit.ends_with(')') => ColumnDef {
            mnemonic: name.trim().to_string(),
            unit: unit.trim_end_matches(')').trim().to_string(),
        },
        _ => ColumnDef {
            mnemonic: cell.to_string(),
            unit: String::new(),
        },
    }
}

/// Parse one cell; `None` is a malformed number.
fn parse_cell(cell: &str) -> Option<f64> {
    let s = cell.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("null") || s == "-" {
        return Some(f64::NAN);
    }
    let v: f64 = s.parse().ok()?;
    if !v.is_finite() || (v - LAS_DEFAULT_NULL).abs() < 1e-6 {
        Some(f64::NAN)
    } else {
        Some(v)
    }
}

/// Parse CSV text into a curve set. The header carries no well metadata.
pub fn parse_csv_str(text: &str) -> Result<CurveSet, LogReadError> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return Err(LogReadError::NoCurves);
    };
    let columns: Vec<ColumnDef> = csv_split(header_line.trim_start_matches('\u{feff}'))
        .iter()
        .map(|c| column_def(c))
        .collect();
    if columns.iter().all(|c| c.mnemonic.is_empty()) {
        return Err(LogReadError::NoCurves);
    }

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let line_num = idx + 1;
        let cells = csv_split(line);
        if cells.len() != columns.len() {
            return Err(LogReadError::ColumnCount {
                line: line_num,
                expected: columns.len(),
                found: cells.len(),
            });
        }
        let row = cells
            .iter()
            .map(|c| {
                parse_cell(c).ok_or_else(|| LogReadError::InvalidNumber {
                    line: line_num,
                    token: c.trim().to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(row);
    }

    debug!(columns = columns.len(), rows = rows.len(), "CSV parsed");
    assemble(WellHeader::default(), &columns, &rows)
}
