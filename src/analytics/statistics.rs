//! Per-curve summary statistics over a queried depth window.

use crate::types::{round4, SampleRow};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::HashMap;

/// Aggregate statistics for one curve over one depth window.
///
/// `count` is the number of rows in the window (identical for every curve);
/// `non_null_count` is how many of those rows carry a value for this curve.
/// When `non_null_count` is zero, min/max/mean are `None` — "no data", never
/// a degenerate zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub count: usize,
    pub non_null_count: usize,
}

impl CurveStats {
    pub fn has_data(&self) -> bool {
        self.non_null_count > 0
    }

    /// Spread of observed values, the curve-ranking signal for focus and
    /// dominance selection.
    pub fn value_range(&self) -> Option<f64> {
        Some(self.max? - self.min?)
    }
}

/// Compute per-curve statistics over present values only.
///
/// Tolerates empty rows and an empty curve list (returns an empty map).
pub fn curve_statistics(rows: &[SampleRow], curves: &[String]) -> HashMap<String, CurveStats> {
    let mut stats = HashMap::with_capacity(curves.len());
    for curve in curves {
        let values: Vec<f64> = rows.iter().filter_map(|row| row.value(curve)).collect();
        let entry = if values.is_empty() {
            CurveStats {
                min: None,
                max: None,
                mean: None,
                count: rows.len(),
                non_null_count: 0,
            }
        } else {
            CurveStats {
                min: Some(round4(Statistics::min(values.iter().copied()))),
                max: Some(round4(Statistics::max(values.iter().copied()))),
                mean: Some(round4(Statistics::mean(values.iter().copied()))),
                count: rows.len(),
                non_null_count: values.len(),
            }
        };
        stats.insert(curve.clone(), entry);
    }
    stats
}
