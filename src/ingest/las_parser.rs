//! LAS (Log ASCII Standard) parser for mud-gas chromatography logs.
//!
//! A LAS file carries four logical sections, each introduced by a `~` marker:
//! `~V` (version), `~W` (well header), `~C` (curve declarations, first row is
//! the depth/index column), and `~A` (the depth-ordered data matrix, one
//! whitespace-separated column per declared curve).
//!
//! `parse_las` is a pure transform from raw bytes to a validated
//! [`ParsedLas`]. It decodes lossily rather than aborting on bad byte
//! sequences, and streams the data matrix row by row so peak memory stays
//! proportional to the output, not to intermediate representations.

use crate::ingest::taxonomy::categorize;
use crate::types::{round4, CurveDefinition, DepthSample, ParsedLas, WellInfo};
use std::collections::HashMap;
use thiserror::Error;

/// Parse failures for a LAS upload. Not retried — the file is rejected.
#[derive(Debug, Error)]
pub enum LasError {
    #[error("empty file")]
    Empty,

    #[error("missing required section: ~{0}")]
    MissingSection(char),

    #[error("curve section declares no columns")]
    NoCurves,
}

/// Well-name placeholder when the header has no usable WELL field.
const UNKNOWN_WELL: &str = "Unknown Well";

/// Default null sentinel when the header omits NULL.
const DEFAULT_NULL_VALUE: f64 = -9999.0;

/// One parsed `MNEM.UNIT VALUE : DESCRIPTION` header line.
struct HeaderField {
    unit: String,
    value: String,
    descr: String,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    Version,
    Well,
    Curves,
    Other,
    Data,
}

/// Parse a LAS file from raw bytes.
pub fn parse_las(bytes: &[u8]) -> Result<ParsedLas, LasError> {
    if bytes.is_empty() {
        return Err(LasError::Empty);
    }
    let text = String::from_utf8_lossy(bytes);

    let mut section = Section::None;
    let mut saw_well_section = false;
    let mut saw_data_section = false;

    let mut version_fields: HashMap<String, HeaderField> = HashMap::new();
    let mut well_fields: HashMap<String, HeaderField> = HashMap::new();
    let mut curve_decls: Vec<(String, String, String)> = Vec::new();

    // Data-matrix accumulation. Tokens are buffered across lines and flushed
    // per full row, which also handles WRAP=YES files transparently.
    let mut null_value = DEFAULT_NULL_VALUE;
    let mut mnemonics: Vec<String> = Vec::new();
    let mut pending: Vec<Option<f64>> = Vec::new();
    let mut samples: Vec<DepthSample> = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(marker) = line.strip_prefix('~') {
            section = match marker.chars().next().map(|c| c.to_ascii_uppercase()) {
                Some('V') => Section::Version,
                Some('W') => Section::Well,
                Some('C') => Section::Curves,
                Some('A') => Section::Data,
                _ => Section::Other,
            };
            match section {
                Section::Well => saw_well_section = true,
                Section::Data => {
                    saw_data_section = true;
                    if curve_decls.is_empty() {
                        return Err(LasError::NoCurves);
                    }
                    // The null sentinel and column layout are fixed once data
                    // begins; resolve them here so row flushing stays cheap.
                    null_value = header_f64(&well_fields, "NULL").unwrap_or(DEFAULT_NULL_VALUE);
                    mnemonics = curve_decls
                        .iter()
                        .skip(1)
                        .map(|(mnemonic, _, _)| mnemonic.clone())
                        .collect();
                }
                _ => {}
            }
            continue;
        }

        match section {
            Section::Version => {
                if let Some((mnemonic, field)) = parse_header_line(line) {
                    version_fields.insert(mnemonic.to_uppercase(), field);
                }
            }
            Section::Well => {
                if let Some((mnemonic, field)) = parse_header_line(line) {
                    well_fields.insert(mnemonic.to_uppercase(), field);
                }
            }
            Section::Curves => {
                if let Some((mnemonic, field)) = parse_header_line(line) {
                    curve_decls.push((mnemonic, field.unit, field.descr));
                }
            }
            Section::Data => {
                for token in line.split_whitespace() {
                    pending.push(parse_cell(token, null_value));
                    if pending.len() == curve_decls.len() {
                        flush_row(&mut pending, &mnemonics, &mut samples);
                    }
                }
            }
            Section::None | Section::Other => {}
        }
    }

    if !saw_well_section {
        return Err(LasError::MissingSection('W'));
    }
    if curve_decls.is_empty() {
        return Err(LasError::MissingSection('C'));
    }
    if !saw_data_section {
        return Err(LasError::MissingSection('A'));
    }
    // A trailing partial row (token count not divisible by the column count)
    // is dropped rather than padded.

    let info = build_well_info(&version_fields, &well_fields);
    let curves = curve_decls
        .iter()
        .skip(1)
        .map(|(mnemonic, unit, descr)| CurveDefinition {
            mnemonic: mnemonic.clone(),
            unit: if unit.is_empty() {
                "UNKN".to_string()
            } else {
                unit.clone()
            },
            description: descr.clone(),
            category: categorize(mnemonic).to_string(),
        })
        .collect::<Vec<_>>();

    tracing::info!(
        well = %info.well_name,
        curves = curves.len(),
        depth_points = samples.len(),
        "Parsed LAS file"
    );

    Ok(ParsedLas {
        info,
        curves,
        samples,
    })
}

/// Normalize one matrix cell: unparseable, NaN, and null-sentinel values all
/// collapse to "no value"; everything else is rounded to 4 decimals.
fn parse_cell(token: &str, null_value: f64) -> Option<f64> {
    let value = token.parse::<f64>().ok()?;
    if value.is_nan() || value == null_value {
        return None;
    }
    Some(round4(value))
}

/// Flush one complete row from the token buffer into the sample list.
/// Rows with an absent depth (first column) are dropped entirely.
fn flush_row(pending: &mut Vec<Option<f64>>, mnemonics: &[String], samples: &mut Vec<DepthSample>) {
    let row: Vec<Option<f64>> = pending.drain(..).collect();
    let Some(depth) = row[0] else {
        return;
    };
    let values = mnemonics
        .iter()
        .cloned()
        .zip(row.into_iter().skip(1))
        .collect::<HashMap<_, _>>();
    samples.push(DepthSample { depth, values });
}

fn build_well_info(
    version_fields: &HashMap<String, HeaderField>,
    well_fields: &HashMap<String, HeaderField>,
) -> WellInfo {
    let depth_unit = well_fields
        .get("STRT")
        .map(|f| f.unit.trim().to_uppercase())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "F".to_string());

    WellInfo {
        well_name: header_str(well_fields, "WELL").unwrap_or_else(|| UNKNOWN_WELL.to_string()),
        start_depth: header_f64(well_fields, "STRT").unwrap_or(0.0),
        stop_depth: header_f64(well_fields, "STOP").unwrap_or(0.0),
        step: header_f64(well_fields, "STEP"),
        null_value: header_f64(well_fields, "NULL").unwrap_or(DEFAULT_NULL_VALUE),
        depth_unit,
        las_version: header_str(version_fields, "VERS").unwrap_or_else(|| "2.0".to_string()),
        location: header_str(well_fields, "LOC"),
        country: header_str(well_fields, "CTRY"),
        company: header_str(well_fields, "COMP"),
        field: header_str(well_fields, "FLD"),
        service_company: header_str(well_fields, "SRVC"),
        date_analyzed: header_str(well_fields, "DATE"),
    }
}

fn header_str(fields: &HashMap<String, HeaderField>, key: &str) -> Option<String> {
    fields
        .get(key)
        .map(|f| f.value.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn header_f64(fields: &HashMap<String, HeaderField>, key: &str) -> Option<f64> {
    fields.get(key).and_then(|f| f.value.trim().parse().ok())
}

/// Parse a `MNEM.UNIT VALUE : DESCRIPTION` header line.
///
/// The unit runs from the first `.` to the first whitespace; the value is
/// everything up to the last `:`; the description follows it. Lines without a
/// `.` (continuation garbage, stray text) are ignored.
fn parse_header_line(line: &str) -> Option<(String, HeaderField)> {
    let dot = line.find('.')?;
    let mnemonic = line[..dot].trim();
    if mnemonic.is_empty() {
        return None;
    }
    let rest = &line[dot + 1..];
    let unit_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let unit = rest[..unit_end].trim().to_string();
    let tail = &rest[unit_end..];
    let (value, descr) = match tail.rfind(':') {
        Some(idx) => (tail[..idx].trim(), tail[idx + 1..].trim()),
        None => (tail.trim(), ""),
    };
    Some((
        mnemonic.to_string(),
        HeaderField {
            unit,
            value: value.to_string(),
            descr: descr.to_string(),
        },
    ))
}
