//! LAS 2.0 reader (unwrapped files only)
//!
//! Header lines follow `MNEM.UNIT  DATA : DESCRIPTION`. The unit runs from
//! the first period to the next whitespace; data runs from there to the
//! last colon.

use tracing::debug;

use crate::config::defaults::LAS_DEFAULT_NULL;
use crate::types::{CurveSet, WellHeader};

use super::{assemble, ColumnDef, LogReadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Version,
    Well,
    Curve,
    Parameter,
    Other,
    Ascii,
}

impl Section {
    fn from_tag(line: &str) -> Self {
        match line.trim_start_matches('~').chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => Self::Version,
            Some('W') => Self::Well,
            Some('C') => Self::Curve,
            Some('P') => Self::Parameter,
            Some('A') => Self::Ascii,
            _ => Self::Other,
        }
    }
}

/// One parsed header line.
#[derive(Debug, Clone, PartialEq)]
struct HeaderLine {
    mnemonic: String,
    unit: String,
    data: String,
}

fn parse_header_line(line: &str) -> Option<HeaderLine> {
    let (mnemonic, rest) = line.split_once('.')?;
    let unit_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (unit, rest) = rest.split_at(unit_end);
    let data = match rest.rfind(':') {
        Some(colon) => &rest[..colon],
        None => rest,
    };
    Some(HeaderLine {
        mnemonic: mnemonic.trim().to_string(),
        unit: unit.trim().to_string(),
        data: data.trim().to_string(),
    })
}

fn is_null(value: f64, null: f64) -> bool {
    (value - null).abs() < 1e-6
}

/// Parse LAS 2.0 text into a curve set.
pub fn parse_las_str(text: &str) -> Result<CurveSet, LogReadError> {
    let mut section = Section::Other;
    let mut header = WellHeader::default();
    let mut null = LAS_DEFAULT_NULL;
    let mut columns: Vec<ColumnDef> = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut saw_curves = false;
    let mut saw_ascii = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_num = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('~') {
            section = Section::from_tag(line);
            saw_curves |= section == Section::Curve;
            saw_ascii |= section == Section::Ascii;
            continue;
        }

        match section {
            Section::Version => {
                if let Some(h) = parse_header_line(line) {
                    if h.mnemonic.eq_ignore_ascii_case("WRAP") && h.data.eq_ignore_ascii_case("YES") {
                        return Err(LogReadError::Unsupported("wrapped LAS (WRAP = YES)".to_string()));
                    }
                }
            }
            Section::Well => {
                let Some(h) = parse_header_line(line) else { continue };
                match h.mnemonic.to_ascii_uppercase().as_str() {
                    "WELL" => header.name = h.data,
                    "FLD" => header.field = h.data,
                    "COMP" => header.operator = h.data,
                    "SRVC" => header.service_company = h.data,
                    "LOC" => header.location = h.data,
                    "DATE" => header.date = h.data,
                    "NULL" => {
                        null = h.data.parse().map_err(|_| LogReadError::InvalidNumber {
                            line: line_num,
                            token: h.data.clone(),
                        })?;
                    }
                    _ => {}
                }
            }
            Section::Curve => {
                if let Some(h) = parse_header_line(line) {
                    columns.push(ColumnDef { mnemonic: h.mnemonic, unit: h.unit });
                }
            }
            Section::Ascii => {
                let mut row = Vec::with_capacity(columns.len());
                for token in line.split_whitespace() {
                    let value: f64 = token.parse().map_err(|_| LogReadError::InvalidNumber {
                        line: line_num,
                        token: token.to_string(),
                    })?;
                    row.push(if is_null(value, null) { f64::NAN } else { value });
                }
                if row.len() != columns.len() {
                    return Err(LogReadError::ColumnCount {
                        line: line_num,
                        expected: columns.len(),
                        found: row.len(),
                    });
                }
                rows.push(row);
            }
            Section::Parameter | Section::Other => {}
        }
    }

    if !saw_curves {
        return Err(LogReadError::MissingSection("~C (curve information)"));
    }
    if !saw_ascii {
        return Err(LogReadError::MissingSection("~A (ASCII data)"));
    }

    debug!(columns = columns.len(), rows = rows.len(), null, "LAS parsed");
    assemble(header, &columns, &rows)
}
