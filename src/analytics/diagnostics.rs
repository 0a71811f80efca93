//! Shared diagnostics over per-curve (depth, value) pair sequences.
//!
//! Single implementation of trend classification, percentiles, high-response
//! zones, and Pearson correlation, consumed by both the chat context
//! assembler and the deterministic interpreter.
//!
//! Long wells are subsampled with a fixed stride before analysis. This bounds
//! analytics cost on arbitrarily long intervals at the price of statistical
//! approximation — a known precision/performance trade-off.

use crate::types::SampleRow;

/// Row cap for chat-path analytics.
pub const CHAT_ANALYTICS_ROW_CAP: usize = 3500;

/// Row cap for interpretation-path analytics.
pub const INTERPRETATION_ANALYTICS_ROW_CAP: usize = 4000;

/// Minimum pairs for a chat-path high-response zone.
///
/// The chat and interpretation paths intentionally disagree on this minimum
/// (3 vs 8); the discrepancy is inherited behavior and kept explicit rather
/// than unified.
pub const CHAT_HIGH_ZONE_MIN_POINTS: usize = 3;

/// Minimum pairs for an interpretation-path high-response zone.
pub const INTERPRETATION_HIGH_ZONE_MIN_POINTS: usize = 8;

/// Minimum pairs for a per-curve diagnostics line. Same 3-point floor as the
/// chat high-response zone, named for the path that uses it.
pub const DIAGNOSTICS_MIN_POINTS: usize = CHAT_HIGH_ZONE_MIN_POINTS;

/// Fewer points than this and trend classification is undefined.
const TREND_MIN_POINTS: usize = 12;

/// Relative head-to-tail change beyond which a trend is called.
const TREND_RELATIVE_THRESHOLD: f64 = 0.08;

/// Trend of a curve across a depth window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    InsufficientPoints,
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::InsufficientPoints => "insufficient points",
            Trend::Increasing => "increasing with depth",
            Trend::Decreasing => "decreasing with depth",
            Trend::Stable => "mostly stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A depth interval where a curve sits at or above its p90 value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighResponseZone {
    pub depth_top: f64,
    pub depth_bottom: f64,
    pub threshold: f64,
}

/// Extract a curve's (depth, value) pairs from queried rows.
///
/// Pairing is by sample index: a row missing the value for this curve is
/// dropped from the pair list entirely. Above `row_cap` rows, the row set is
/// subsampled with stride ⌈n / cap⌉, preserving order.
pub fn curve_pairs(rows: &[SampleRow], curve: &str, row_cap: usize) -> Vec<(f64, f64)> {
    if rows.is_empty() {
        return Vec::new();
    }
    let stride = rows.len().div_ceil(row_cap.max(1)).max(1);
    rows.iter()
        .step_by(stride)
        .filter_map(|row| row.value(curve).map(|v| (row.depth, v)))
        .collect()
}

/// Arithmetic mean; `None` on an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Linear-interpolation percentile over the sorted values.
///
/// Position is q × (n − 1), interpolated between the two bracketing sorted
/// values. `None` when empty; for n = 1 the single value regardless of q.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n == 1 {
        return Some(sorted[0]);
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = pos - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Classify the head-to-tail drift of a value sequence ordered by depth.
///
/// Head and tail windows are max(3, n/5) elements from each end; for small n
/// the windows may overlap, which is accepted behavior. Relative change is
/// scaled by the larger window magnitude with a 1e-9 floor.
pub fn trend(values: &[f64]) -> Trend {
    if values.len() < TREND_MIN_POINTS {
        return Trend::InsufficientPoints;
    }
    let window = (values.len() / 5).max(3);
    let (Some(head), Some(tail)) = (
        mean(&values[..window]),
        mean(&values[values.len() - window..]),
    ) else {
        return Trend::InsufficientPoints;
    };

    let scale = head.abs().max(tail.abs()).max(1e-9);
    let relative = (tail - head) / scale;
    if relative >= TREND_RELATIVE_THRESHOLD {
        Trend::Increasing
    } else if relative <= -TREND_RELATIVE_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Pearson correlation coefficient of two sequences aligned by position.
///
/// Both sequences are truncated to the shorter length. `None` with fewer
/// than 3 points or when either sequence has zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len().min(b.len());
    if n < 3 {
        return None;
    }
    let a = &a[..n];
    let b = &b[..n];
    let mean_a = mean(a)?;
    let mean_b = mean(b)?;

    let numerator: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum();
    let den_a: f64 = a.iter().map(|x| (x - mean_a).powi(2)).sum();
    let den_b: f64 = b.iter().map(|y| (y - mean_b).powi(2)).sum();
    let denominator = (den_a * den_b).sqrt();
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Qualitative (strength, direction) bands for a correlation coefficient.
pub fn correlation_strength(r: f64) -> (&'static str, &'static str) {
    let strength = if r.abs() >= 0.7 {
        "strong"
    } else if r.abs() >= 0.4 {
        "moderate"
    } else {
        "weak"
    };
    let direction = if r >= 0.0 { "positive" } else { "negative" };
    (strength, direction)
}

/// The [min, max] depth interval whose values sit at or above the curve's
/// 90th percentile. `None` below `min_points` pairs or when no depth clears
/// the threshold.
pub fn high_response_zone(pairs: &[(f64, f64)], min_points: usize) -> Option<HighResponseZone> {
    if pairs.len() < min_points {
        return None;
    }
    let values: Vec<f64> = pairs.iter().map(|&(_, v)| v).collect();
    let threshold = percentile(&values, 0.9)?;
    let mut depths = pairs
        .iter()
        .filter(|&&(_, v)| v >= threshold)
        .map(|&(d, _)| d);
    let first = depths.next()?;
    let (top, bottom) = depths.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(HighResponseZone {
        depth_top: top,
        depth_bottom: bottom,
        threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use std::collections::HashMap;

    fn rows_from(pairs: &[(f64, Option<f64>)]) -> Vec<SampleRow> {
        pairs
            .iter()
            .map(|&(depth, v)| {
                let mut values = HashMap::new();
                values.insert("HC1".to_string(), v);
                SampleRow { depth, values }
            })
            .collect()
    }

    #[test]
    fn trend_increasing_on_monotone_sequence() {
        let values: Vec<f64> = (0..20).map(|i| i as f64 * 5.0).collect();
        assert_eq!(trend(&values), Trend::Increasing);
    }

    #[test]
    fn trend_decreasing_on_falling_sequence() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 - i as f64 * 5.0).collect();
        assert_eq!(trend(&values), Trend::Decreasing);
    }

    #[test]
    fn trend_stable_on_constant_sequence() {
        let values = vec![42.0; 20];
        assert_eq!(trend(&values), Trend::Stable);
    }

    #[test]
    fn trend_undefined_below_twelve_points() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(trend(&values), Trend::InsufficientPoints);
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let values = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile(&values, 0.5), Some(30.0));
        // 0.9 * 4 = 3.6 → 40 + 0.6 * 10
        assert_eq!(percentile(&values, 0.9), Some(46.0));
        assert_eq!(percentile(&[7.5], 0.9), Some(7.5));
        assert_eq!(percentile(&[], 0.9), None);
    }

    #[test]
    fn percentile_is_shuffle_invariant() {
        let mut values: Vec<f64> = (0..50).map(|i| (i * 13 % 47) as f64).collect();
        let expected = percentile(&values, 0.9);
        let mut rng = rand::thread_rng();
        for _ in 0..5 {
            values.shuffle(&mut rng);
            assert_eq!(percentile(&values, 0.9), expected);
        }
    }

    #[test]
    fn pearson_is_symmetric() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let b = vec![2.0, 4.0, 5.0, 4.0, 6.0];
        assert_eq!(pearson(&a, &b), pearson(&b, &a));
    }

    #[test]
    fn pearson_undefined_for_constant_or_short_input() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0, 2.0]), None);
    }

    #[test]
    fn pearson_detects_perfect_correlation() {
        let a: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..30).map(|i| 3.0 * i as f64 + 1.0).collect();
        let r = pearson(&a, &b).unwrap();
        assert!((r - 1.0).abs() < 1e-9);

        let c: Vec<f64> = (0..30).map(|i| -2.0 * i as f64).collect();
        let r = pearson(&a, &c).unwrap();
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn correlation_bands() {
        assert_eq!(correlation_strength(0.9), ("strong", "positive"));
        assert_eq!(correlation_strength(-0.5), ("moderate", "negative"));
        assert_eq!(correlation_strength(0.1), ("weak", "positive"));
    }

    #[test]
    fn curve_pairs_drop_missing_entries() {
        let rows = rows_from(&[
            (100.0, Some(1.0)),
            (101.0, None),
            (102.0, Some(3.0)),
        ]);
        let pairs = curve_pairs(&rows, "HC1", CHAT_ANALYTICS_ROW_CAP);
        assert_eq!(pairs, vec![(100.0, 1.0), (102.0, 3.0)]);
    }

    #[test]
    fn curve_pairs_subsample_above_cap() {
        let raw: Vec<(f64, Option<f64>)> =
            (0..100).map(|i| (i as f64, Some(i as f64))).collect();
        let rows = rows_from(&raw);
        let pairs = curve_pairs(&rows, "HC1", 25);
        // stride = ceil(100 / 25) = 4
        assert_eq!(pairs.len(), 25);
        assert_eq!(pairs[0].0, 0.0);
        assert_eq!(pairs[1].0, 4.0);
    }

    #[test]
    fn high_response_zone_spans_p90_depths() {
        let pairs: Vec<(f64, f64)> = (0..20).map(|i| (1000.0 + i as f64, i as f64)).collect();
        let zone = high_response_zone(&pairs, CHAT_HIGH_ZONE_MIN_POINTS).unwrap();
        // p90 of 0..19 = 17.1 → depths with value >= 17.1 are 1018, 1019
        assert_eq!(zone.depth_top, 1018.0);
        assert_eq!(zone.depth_bottom, 1019.0);
        assert!((zone.threshold - 17.1).abs() < 1e-9);
    }

    #[test]
    fn high_response_zone_respects_minimum_points() {
        let pairs = vec![(100.0, 1.0), (101.0, 2.0), (102.0, 3.0)];
        assert!(high_response_zone(&pairs, CHAT_HIGH_ZONE_MIN_POINTS).is_some());
        assert!(high_response_zone(&pairs, INTERPRETATION_HIGH_ZONE_MIN_POINTS).is_none());
    }

    #[test]
    fn diagnostics_floor_matches_chat_high_zone_minimum() {
        // Both paths share the 3-point floor; the interpretation zone
        // minimum is the one that differs.
        assert_eq!(DIAGNOSTICS_MIN_POINTS, CHAT_HIGH_ZONE_MIN_POINTS);
        assert_eq!(DIAGNOSTICS_MIN_POINTS, 3);
    }
}
