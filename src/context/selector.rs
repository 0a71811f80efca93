//! Curve-set selection for a chat query.
//!
//! Picks the bounded curve subset to analyze, reports unknown requests, and
//! extracts which curves a free-text message appears to reference.

use crate::analytics::CurveStats;
use crate::types::WellInfo;
use std::collections::{HashMap, HashSet};

/// Hard cap on the analyzed curve set.
pub const MAX_CONTEXT_CURVES: usize = 12;

/// Hard cap on focus curves for one reply.
pub const MAX_FOCUS_CURVES: usize = 4;

/// Priority order for the default curve subset when the caller supplies no
/// recognized curves: gas/hydrocarbon families first, then drilling rate and
/// composition channels.
pub const DEFAULT_CONTEXT_CURVES: &[&str] = &[
    "TOTAL_GAS",
    "HC1",
    "HC2",
    "HC3",
    "HC4",
    "HC5",
    "HC6",
    "ROP(ft/hr)",
    "ROP(MIN/FT)",
    "AROM",
    "BEN_TOL",
    "NAPH",
    "PARA",
];

/// How the analyzed curve set was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    UserSelected,
    DefaultSubset,
}

impl SelectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionMode::UserSelected => "user_selected",
            SelectionMode::DefaultSubset => "default_subset",
        }
    }

    /// Human-readable scope label used in the assembled context.
    pub fn scope_label(self) -> &'static str {
        match self {
            SelectionMode::UserSelected => "User-selected visualization scope",
            SelectionMode::DefaultSubset => "Default subset scope",
        }
    }
}

/// Outcome of curve-set selection.
#[derive(Debug, Clone)]
pub struct CurveSelection {
    /// Curves to analyze, capped at [`MAX_CONTEXT_CURVES`].
    pub analyzed: Vec<String>,
    /// Requested mnemonics the well does not have. Reported, never silently
    /// merged into the analyzed set.
    pub ignored: Vec<String>,
    pub mode: SelectionMode,
}

/// Select the curve set to analyze for a request.
///
/// Recognized requested curves win (request order, deduplicated, capped).
/// With no recognized request, fall back to the default priority list
/// filtered to availability, padded with the remaining available curves in
/// lexicographic order.
pub fn select_context_curves(requested: &[String], available: &[String]) -> CurveSelection {
    let available_set: HashSet<&str> = available.iter().map(String::as_str).collect();
    let mut analyzed: Vec<String> = Vec::new();
    let mut ignored: Vec<String> = Vec::new();

    for curve in requested {
        if available_set.contains(curve.as_str()) {
            if !analyzed.contains(curve) {
                analyzed.push(curve.clone());
            }
        } else if !ignored.contains(curve) {
            ignored.push(curve.clone());
        }
    }

    if !analyzed.is_empty() {
        analyzed.truncate(MAX_CONTEXT_CURVES);
        return CurveSelection {
            analyzed,
            ignored,
            mode: SelectionMode::UserSelected,
        };
    }

    let mut fallback: Vec<String> = DEFAULT_CONTEXT_CURVES
        .iter()
        .filter(|c| available_set.contains(**c))
        .map(|c| c.to_string())
        .collect();
    if fallback.len() < MAX_CONTEXT_CURVES {
        let mut remaining: Vec<&str> = available
            .iter()
            .map(String::as_str)
            .filter(|c| !fallback.iter().any(|f| f == c))
            .collect();
        remaining.sort_unstable();
        remaining.dedup();
        for curve in remaining {
            fallback.push(curve.to_string());
            if fallback.len() >= MAX_CONTEXT_CURVES {
                break;
            }
        }
    }
    fallback.truncate(MAX_CONTEXT_CURVES);

    CurveSelection {
        analyzed: fallback,
        ignored,
        mode: SelectionMode::DefaultSubset,
    }
}

/// Uppercase and strip everything that is not an ASCII letter or digit.
fn normalize_token(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Curves the free-text message appears to reference.
///
/// A curve matches when its raw uppercased form is a literal substring of the
/// uppercased message, or its normalized form is a non-empty substring of the
/// normalized message. Longer names are evaluated first so a longer mnemonic
/// wins over a shorter one that is a substring of it; output preserves
/// first-match order without duplicates.
pub fn extract_mentioned_curves(message: &str, available: &[String]) -> Vec<String> {
    if message.is_empty() {
        return Vec::new();
    }
    let raw_message = message.to_uppercase();
    let normalized_message = normalize_token(message);

    let mut candidates: Vec<&String> = available.iter().collect();
    candidates.sort_by_key(|c| std::cmp::Reverse(c.len()));

    let mut matches: Vec<String> = Vec::new();
    for curve in candidates {
        let curve_upper = curve.to_uppercase();
        let curve_normalized = normalize_token(curve);
        let hit = raw_message.contains(&curve_upper)
            || (!curve_normalized.is_empty() && normalized_message.contains(&curve_normalized));
        if hit && !matches.contains(curve) {
            matches.push(curve.clone());
        }
    }
    matches
}

/// Pick the focus curves for one reply, bounded by `max_curves`.
///
/// Explicit mentions (intersected with the analyzed set) come first; the
/// remaining slots go to curves with the widest value range, ties breaking
/// toward earlier scope position; any leftover slots fill in scope order.
pub fn pick_focus_curves(
    mentioned: &[String],
    scope: &[String],
    stats: &HashMap<String, CurveStats>,
    max_curves: usize,
) -> Vec<String> {
    let mut focus: Vec<String> = Vec::new();

    for curve in mentioned {
        if scope.contains(curve) && !focus.contains(curve) {
            focus.push(curve.clone());
        }
        if focus.len() >= max_curves {
            return focus;
        }
    }

    let mut scored: Vec<(f64, &String)> = scope
        .iter()
        .filter_map(|curve| {
            let s = stats.get(curve)?;
            if !s.has_data() {
                return None;
            }
            Some((s.value_range()?, curve))
        })
        .collect();
    // Stable sort: equal ranges keep scope order.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    for (_, curve) in scored {
        if !focus.contains(curve) {
            focus.push(curve.clone());
        }
        if focus.len() >= max_curves {
            return focus;
        }
    }

    for curve in scope {
        if !focus.contains(curve) {
            focus.push(curve.clone());
        }
        if focus.len() >= max_curves {
            break;
        }
    }

    focus
}

/// Clamp a requested depth window into the well's extent.
///
/// A degenerate window (min ≥ max after clamping) falls back to the well's
/// full extent rather than erroring — the chat path always analyzes
/// something.
pub fn normalize_depth_range(
    requested_min: Option<f64>,
    requested_max: Option<f64>,
    well: &WellInfo,
) -> (f64, f64) {
    let depth_min = requested_min
        .unwrap_or(well.start_depth)
        .clamp(well.start_depth, well.stop_depth);
    let depth_max = requested_max
        .unwrap_or(well.stop_depth)
        .clamp(well.start_depth, well.stop_depth);

    if depth_min >= depth_max {
        return (well.start_depth, well.stop_depth);
    }
    (depth_min, depth_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn stats_with_range(entries: &[(&str, f64, f64)]) -> HashMap<String, CurveStats> {
        entries
            .iter()
            .map(|&(name, min, max)| {
                (
                    name.to_string(),
                    CurveStats {
                        min: Some(min),
                        max: Some(max),
                        mean: Some((min + max) / 2.0),
                        count: 10,
                        non_null_count: 10,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn recognized_requests_win_and_unknowns_are_reported() {
        let selection = select_context_curves(
            &names(&["HC1", "UNKNOWN_X"]),
            &names(&["HC1", "HC2", "TOTAL_GAS"]),
        );
        assert_eq!(selection.analyzed, names(&["HC1"]));
        assert_eq!(selection.ignored, names(&["UNKNOWN_X"]));
        assert_eq!(selection.mode, SelectionMode::UserSelected);
    }

    #[test]
    fn empty_request_falls_back_to_default_subset() {
        let available = names(&["HC2", "AAA", "TOTAL_GAS", "BBB", "HC1"]);
        let selection = select_context_curves(&[], &available);
        assert_eq!(selection.mode, SelectionMode::DefaultSubset);
        // Priority curves first, then lexicographic padding.
        assert_eq!(
            selection.analyzed[..3],
            names(&["TOTAL_GAS", "HC1", "HC2"])[..]
        );
        assert_eq!(selection.analyzed[3..], names(&["AAA", "BBB"])[..]);
    }

    #[test]
    fn analyzed_set_is_capped_and_deduplicated() {
        let available: Vec<String> = (0..20).map(|i| format!("C{i:02}")).collect();
        let mut requested = available.clone();
        requested.push("C00".to_string());
        let selection = select_context_curves(&requested, &available);
        assert_eq!(selection.analyzed.len(), MAX_CONTEXT_CURVES);
        assert_eq!(selection.analyzed[0], "C00");
    }

    #[test]
    fn longest_mention_wins_over_substring() {
        let available = names(&["ROP(ft/hr)", "ROP"]);
        let mentioned = extract_mentioned_curves("what about ROP(ft/hr) trend", &available);
        assert_eq!(mentioned, names(&["ROP(ft/hr)"]));
    }

    #[test]
    fn mentions_match_normalized_forms() {
        let available = names(&["BEN_TOL", "HC1"]);
        let mentioned = extract_mentioned_curves("is ben tol rising near the top?", &available);
        assert_eq!(mentioned, names(&["BEN_TOL"]));
        assert!(extract_mentioned_curves("", &available).is_empty());
    }

    #[test]
    fn focus_prefers_mentions_then_value_range() {
        let scope = names(&["HC1", "HC2", "HC3"]);
        let stats = stats_with_range(&[("HC1", 0.0, 1.0), ("HC2", 0.0, 100.0), ("HC3", 0.0, 50.0)]);
        let focus = pick_focus_curves(&names(&["HC3"]), &scope, &stats, 2);
        assert_eq!(focus, names(&["HC3", "HC2"]));
    }

    #[test]
    fn focus_fills_with_scope_order_when_no_stats() {
        let scope = names(&["A", "B", "C"]);
        let focus = pick_focus_curves(&[], &scope, &HashMap::new(), MAX_FOCUS_CURVES);
        assert_eq!(focus, names(&["A", "B", "C"]));
    }

    #[test]
    fn depth_range_clamps_and_recovers_degenerate_windows() {
        let well = WellInfo {
            start_depth: 1000.0,
            stop_depth: 2000.0,
            ..WellInfo::default()
        };
        assert_eq!(
            normalize_depth_range(Some(500.0), Some(1500.0), &well),
            (1000.0, 1500.0)
        );
        assert_eq!(
            normalize_depth_range(Some(1800.0), Some(1200.0), &well),
            (1000.0, 2000.0)
        );
        assert_eq!(normalize_depth_range(None, None, &well), (1000.0, 2000.0));
    }
}
