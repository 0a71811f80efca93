//! Well, curve, and sample records shared by the parser, store, and analytics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store-assigned well identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WellId(pub u64);

impl std::fmt::Display for WellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Well-level metadata extracted from the LAS header sections.
///
/// `start_depth` and `stop_depth` are always present (0.0 when the header
/// omits them); `depth_unit` is always a non-empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellInfo {
    pub well_name: String,
    pub start_depth: f64,
    pub stop_depth: f64,
    pub step: Option<f64>,
    pub null_value: f64,
    pub depth_unit: String,
    pub las_version: String,
    pub location: Option<String>,
    pub country: Option<String>,
    pub company: Option<String>,
    pub field: Option<String>,
    pub service_company: Option<String>,
    pub date_analyzed: Option<String>,
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            well_name: "Unknown Well".to_string(),
            start_depth: 0.0,
            stop_depth: 0.0,
            step: None,
            null_value: -9999.0,
            depth_unit: "F".to_string(),
            las_version: "2.0".to_string(),
            location: None,
            country: None,
            company: None,
            field: None,
            service_company: None,
            date_analyzed: None,
        }
    }
}

/// One measurement channel declared in the LAS curve section.
///
/// The depth/index column is never materialized as a `CurveDefinition`.
/// `mnemonic` is the case-sensitive identity used for all lookups; `category`
/// is derived from the static taxonomy, never user-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveDefinition {
    pub mnemonic: String,
    pub unit: String,
    pub description: String,
    pub category: String,
}

/// One depth-indexed row of the sample matrix.
///
/// The value map carries the full curve-mnemonic key set for the well even
/// when a given sample has no reading for some curves (`None`, never omitted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthSample {
    pub depth: f64,
    pub values: HashMap<String, Option<f64>>,
}

/// Complete parser output for a single LAS file.
#[derive(Debug, Clone)]
pub struct ParsedLas {
    pub info: WellInfo,
    pub curves: Vec<CurveDefinition>,
    pub samples: Vec<DepthSample>,
}

/// A stored well as returned by the store's metadata queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellRecord {
    pub id: WellId,
    pub info: WellInfo,
    pub uploaded_at: DateTime<Utc>,
    pub source_file: Option<String>,
    pub curve_count: usize,
    pub sample_count: usize,
}

/// One row of a depth-range query result.
///
/// Keys are exactly the requested mnemonics; a mnemonic the well does not
/// carry yields `None` for every row rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleRow {
    pub depth: f64,
    pub values: HashMap<String, Option<f64>>,
}

impl SampleRow {
    /// Value for a curve in this row, flattening the missing-key and
    /// no-reading cases into one `None`.
    pub fn value(&self, mnemonic: &str) -> Option<f64> {
        self.values.get(mnemonic).copied().flatten()
    }
}
