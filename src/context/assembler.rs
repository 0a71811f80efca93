//! Evidence-package assembly for the generative backend.
//!
//! Turns statistics, diagnostics, and selection output into the textual
//! context blocks consumed by the chat and interpretation prompts. All
//! functions are pure formatters.

use crate::analytics::{
    correlation_strength, curve_pairs, high_response_zone, mean, pearson, trend, CurveStats,
    CHAT_ANALYTICS_ROW_CAP, CHAT_HIGH_ZONE_MIN_POINTS, DIAGNOSTICS_MIN_POINTS,
    INTERPRETATION_ANALYTICS_ROW_CAP,
};
use crate::context::selector::CurveSelection;
use crate::types::{round_to, CurveDefinition, SampleRow, WellRecord};
use std::collections::{BTreeMap, HashMap};

/// Maximum raw rows included verbatim in the interpretation prompt.
const PROMPT_SAMPLE_ROWS: usize = 30;

/// Assembled textual context for one chat turn.
#[derive(Debug, Clone)]
pub struct ContextBundle {
    pub well_summary: String,
    pub data_context: String,
}

/// Inputs for [`assemble_chat_context`].
pub struct ChatContextParams<'a> {
    pub record: &'a WellRecord,
    pub all_curves: &'a [CurveDefinition],
    pub selection: &'a CurveSelection,
    pub depth_min: f64,
    pub depth_max: f64,
    pub detail_level: u8,
    pub stats: &'a HashMap<String, CurveStats>,
    pub rows: &'a [SampleRow],
    pub message: &'a str,
    pub mentioned: &'a [String],
    pub focus: &'a [String],
}

/// Well summary block: identity, extent, and acquisition metadata.
pub fn build_well_summary(record: &WellRecord, total_curves: usize) -> String {
    let info = &record.info;
    let step = info
        .step
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    format!(
        "Well: {}\n\
         Location: {}\n\
         Country: {}\n\
         Full depth range: {} - {} {}\n\
         Sampling step: {} {}\n\
         Total curves available: {}\n\
         Date analyzed: {}\n",
        info.well_name,
        info.location.as_deref().unwrap_or("Unknown"),
        info.country.as_deref().unwrap_or("Unknown"),
        info.start_depth,
        info.stop_depth,
        info.depth_unit,
        step,
        info.depth_unit,
        total_curves,
        info.date_analyzed.as_deref().unwrap_or("Unknown"),
    )
}

/// Per-curve statistics lines in scope order.
pub fn format_stats_text(curves: &[String], stats: &HashMap<String, CurveStats>) -> String {
    if curves.is_empty() {
        return "- No statistics available.".to_string();
    }
    let mut lines = Vec::with_capacity(curves.len());
    for curve in curves {
        match stats.get(curve) {
            Some(s) if s.has_data() => {
                if let (Some(min), Some(max), Some(mean)) = (s.min, s.max, s.mean) {
                    lines.push(format!(
                        "- {curve}: min={min}, max={max}, mean={mean} ({} valid points)",
                        s.non_null_count
                    ));
                }
            }
            _ => lines.push(format!("- {curve}: no valid points in this interval")),
        }
    }
    lines.join("\n")
}

/// Row-level focus analytics for the question block: trend, extrema with
/// depth, high-response zone per focus curve, plus one correlation line when
/// the first two focus curves both have data.
pub fn build_query_analytics(rows: &[SampleRow], focus: &[String], depth_unit: &str) -> String {
    if rows.is_empty() || focus.is_empty() {
        return "- No row-level analytics available for this question.".to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut values_by_curve: HashMap<&str, Vec<f64>> = HashMap::new();

    for curve in focus {
        let pairs = curve_pairs(rows, curve, CHAT_ANALYTICS_ROW_CAP);
        if pairs.len() < CHAT_HIGH_ZONE_MIN_POINTS {
            lines.push(format!(
                "- {curve}: not enough valid points for trend/zone analysis."
            ));
            continue;
        }

        let depths: Vec<f64> = pairs.iter().map(|&(d, _)| d).collect();
        let values: Vec<f64> = pairs.iter().map(|&(_, v)| v).collect();

        let cmax = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let cmin = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_idx = values.iter().position(|&v| v == cmax).unwrap_or(0);
        let min_idx = values.iter().position(|&v| v == cmin).unwrap_or(0);
        let cmean = mean(&values).unwrap_or(0.0);

        let zone_text = high_response_zone(&pairs, CHAT_HIGH_ZONE_MIN_POINTS)
            .map(|z| format!("{:.1}-{:.1} {depth_unit}", z.depth_top, z.depth_bottom))
            .unwrap_or_else(|| "n/a".to_string());

        lines.push(format!(
            "- {curve}: trend={}; mean={cmean:.3}; max={cmax:.3} at {:.1} {depth_unit}; \
             min={cmin:.3} at {:.1} {depth_unit}; high-response zone(p90+)={zone_text}",
            trend(&values),
            depths[max_idx],
            depths[min_idx],
        ));
        values_by_curve.insert(curve.as_str(), values);
    }

    if focus.len() >= 2 {
        let (c1, c2) = (focus[0].as_str(), focus[1].as_str());
        if let (Some(a), Some(b)) = (values_by_curve.get(c1), values_by_curve.get(c2)) {
            match pearson(a, b) {
                Some(r) => {
                    let (strength, direction) = correlation_strength(r);
                    lines.push(format!(
                        "- {c1} vs {c2}: {strength} {direction} correlation (r={r:.3}) in current scope."
                    ));
                }
                None => lines.push(format!(
                    "- {c1} vs {c2}: correlation unavailable (insufficient variation)."
                )),
            }
        }
    }

    if lines.is_empty() {
        "- No row-level analytics available for this question.".to_string()
    } else {
        lines.join("\n")
    }
}

/// Assemble the full chat context: well summary plus the scoped data block.
pub fn assemble_chat_context(params: &ChatContextParams<'_>) -> ContextBundle {
    let info = &params.record.info;
    let well_summary = build_well_summary(params.record, params.all_curves.len());

    let mut category_map: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for curve in params.all_curves {
        if params.selection.analyzed.contains(&curve.mnemonic) {
            category_map
                .entry(curve.category.as_str())
                .or_default()
                .push(curve.mnemonic.as_str());
        }
    }
    let categories_text = if category_map.is_empty() {
        "- Not categorized".to_string()
    } else {
        category_map
            .iter()
            .map(|(category, mnemonics)| {
                let mut sorted = mnemonics.clone();
                sorted.sort_unstable();
                format!("- {category}: {}", sorted.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let ignored_text = if params.selection.ignored.is_empty() {
        String::new()
    } else {
        format!(
            "\nIgnored unknown curves from request: {}",
            params.selection.ignored.join(", ")
        )
    };

    let mentioned_text = if params.mentioned.is_empty() {
        "none explicitly".to_string()
    } else {
        params.mentioned.join(", ")
    };
    let focus_text = if params.focus.is_empty() {
        "none".to_string()
    } else {
        params.focus.join(", ")
    };

    let data_context = format!(
        "Current analysis scope ({}):\n\
         - Depth window: {} - {} {}\n\
         - Curves in scope ({}): {}\n\
         - Requested response detail level (1-5): {}\n\
         - Categories in scope:\n{}\n\
         - Curve statistics in current scope:\n{}{}\n\n\
         Question-specific context:\n\
         - User question: {}\n\
         - Curves mentioned by user: {}\n\
         - Focus curves for this reply: {}\n\
         - Focus analytics:\n{}\n\n\
         Important scope rule: prioritize this selected depth window and curve set. \
         Only reference full-well behavior when the user explicitly asks.",
        params.selection.mode.scope_label(),
        params.depth_min,
        params.depth_max,
        info.depth_unit,
        params.selection.analyzed.len(),
        params.selection.analyzed.join(", "),
        params.detail_level,
        categories_text,
        format_stats_text(&params.selection.analyzed, params.stats),
        ignored_text,
        params.message,
        mentioned_text,
        focus_text,
        build_query_analytics(params.rows, params.focus, &info.depth_unit),
    );

    ContextBundle {
        well_summary,
        data_context,
    }
}

/// Derived diagnostics block for the interpretation prompt: interval scope,
/// dominant-variance curves, per-curve trend/extrema/high-zone lines, and
/// pairwise correlations across the leading curves with data.
pub fn build_interpretation_diagnostics(
    stats: &HashMap<String, CurveStats>,
    rows: &[SampleRow],
    curves: &[String],
    depth_min: f64,
    depth_max: f64,
) -> String {
    let mut lines: Vec<String> = vec![
        format!("Interval length: {}", round_to(depth_max - depth_min, 2)),
        format!("Curves analyzed: {}", curves.join(", ")),
    ];

    let mut scored: Vec<(f64, &String)> = curves
        .iter()
        .filter_map(|curve| {
            let s = stats.get(curve)?;
            if !s.has_data() {
                return None;
            }
            Some((s.value_range()?, curve))
        })
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    let dominant: Vec<String> = scored.iter().take(4).map(|(_, c)| (*c).clone()).collect();
    lines.push(format!(
        "Dominant-variance curves: {}",
        if dominant.is_empty() {
            "none".to_string()
        } else {
            dominant.join(", ")
        }
    ));

    let analysis_set: Vec<String> = if dominant.is_empty() {
        curves.iter().take(4).cloned().collect()
    } else {
        dominant
    };

    let mut curve_values: Vec<(String, Vec<f64>)> = Vec::new();
    for curve in &analysis_set {
        let pairs = curve_pairs(rows, curve, INTERPRETATION_ANALYTICS_ROW_CAP);
        if pairs.len() < DIAGNOSTICS_MIN_POINTS {
            continue;
        }
        let depths: Vec<f64> = pairs.iter().map(|&(d, _)| d).collect();
        let values: Vec<f64> = pairs.iter().map(|&(_, v)| v).collect();

        let zone_text = high_response_zone(&pairs, DIAGNOSTICS_MIN_POINTS)
            .map(|z| format!("{}-{}", round_to(z.depth_top, 1), round_to(z.depth_bottom, 1)))
            .unwrap_or_else(|| "n/a".to_string());

        let cmax = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let max_idx = values.iter().position(|&v| v == cmax).unwrap_or(0);
        lines.push(format!(
            "{curve}: trend={}, mean={}, max={} at {}, high-zone(p90+)={zone_text}",
            trend(&values),
            round_to(mean(&values).unwrap_or(0.0), 4),
            round_to(cmax, 4),
            round_to(depths[max_idx], 1),
        ));
        curve_values.push((curve.clone(), values));
    }

    let pair_candidates = &curve_values[..curve_values.len().min(3)];
    for i in 0..pair_candidates.len() {
        for j in (i + 1)..pair_candidates.len() {
            let (name_a, values_a) = &pair_candidates[i];
            let (name_b, values_b) = &pair_candidates[j];
            if let Some(r) = pearson(values_a, values_b) {
                lines.push(format!(
                    "Correlation {name_a} vs {name_b}: r={}",
                    round_to(r, 4)
                ));
            }
        }
    }

    lines
        .iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compact row table for the interpretation prompt (at most
/// [`PROMPT_SAMPLE_ROWS`] rows, evenly strided).
pub fn format_sample_table(rows: &[SampleRow], curves: &[String]) -> String {
    if rows.is_empty() {
        return "No data available.".to_string();
    }
    let step = (rows.len() / PROMPT_SAMPLE_ROWS).max(1);
    let header = format!("Depth | {}", curves.join(" | "));
    let mut lines = vec![header.clone(), "-".repeat(header.len())];
    for row in rows.iter().step_by(step).take(PROMPT_SAMPLE_ROWS) {
        let cells: Vec<String> = curves
            .iter()
            .map(|c| match row.value(c) {
                Some(v) => v.to_string(),
                None => "null".to_string(),
            })
            .collect();
        lines.push(format!("{} | {}", row.depth, cells.join(" | ")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::curve_statistics;
    use crate::context::selector::{select_context_curves, SelectionMode};
    use crate::types::{WellId, WellInfo};
    use chrono::Utc;

    fn rows(depths: &[f64]) -> Vec<SampleRow> {
        depths
            .iter()
            .enumerate()
            .map(|(i, &depth)| {
                let mut values = HashMap::new();
                values.insert("HC1".to_string(), Some(i as f64 * 10.0));
                values.insert("HC2".to_string(), Some(100.0 - i as f64));
                SampleRow { depth, values }
            })
            .collect()
    }

    fn record() -> WellRecord {
        WellRecord {
            id: WellId(1),
            info: WellInfo {
                well_name: "DISCOVERY 12-3".to_string(),
                start_depth: 8000.0,
                stop_depth: 9000.0,
                step: Some(1.0),
                location: Some("Block 12".to_string()),
                ..WellInfo::default()
            },
            uploaded_at: Utc::now(),
            source_file: None,
            curve_count: 2,
            sample_count: 20,
        }
    }

    #[test]
    fn well_summary_uses_unknown_placeholders() {
        let mut rec = record();
        rec.info.step = None;
        rec.info.country = None;
        let summary = build_well_summary(&rec, 2);
        assert!(summary.contains("Well: DISCOVERY 12-3"));
        assert!(summary.contains("Location: Block 12"));
        assert!(summary.contains("Country: Unknown"));
        assert!(summary.contains("Sampling step: Unknown F"));
    }

    #[test]
    fn stats_text_flags_empty_curves() {
        let data = rows(&(0..5).map(|i| 8000.0 + i as f64).collect::<Vec<_>>());
        let curves = vec!["HC1".to_string(), "MISSING".to_string()];
        let stats = curve_statistics(&data, &curves);
        let text = format_stats_text(&curves, &stats);
        assert!(text.contains("- HC1: min=0, max=40, mean=20 (5 valid points)"));
        assert!(text.contains("- MISSING: no valid points in this interval"));
    }

    #[test]
    fn query_analytics_reports_trend_and_correlation() {
        let data = rows(&(0..20).map(|i| 8000.0 + i as f64).collect::<Vec<_>>());
        let focus = vec!["HC1".to_string(), "HC2".to_string()];
        let text = build_query_analytics(&data, &focus, "F");
        assert!(text.contains("HC1: trend=increasing with depth"));
        assert!(text.contains("HC2: trend=decreasing with depth"));
        assert!(text.contains("strong negative correlation"));
    }

    #[test]
    fn query_analytics_handles_sparse_curves() {
        let data = rows(&[8000.0]);
        let focus = vec!["HC1".to_string()];
        let text = build_query_analytics(&data, &focus, "F");
        assert!(text.contains("not enough valid points"));
    }

    #[test]
    fn chat_context_contains_all_blocks() {
        let data = rows(&(0..20).map(|i| 8000.0 + i as f64).collect::<Vec<_>>());
        let available = vec!["HC1".to_string(), "HC2".to_string()];
        let selection = select_context_curves(&["HC1".to_string()], &available);
        assert_eq!(selection.mode, SelectionMode::UserSelected);
        let stats = curve_statistics(&data, &selection.analyzed);
        let all_curves = vec![
            CurveDefinition {
                mnemonic: "HC1".to_string(),
                unit: "PPM".to_string(),
                description: String::new(),
                category: "Hydrocarbons".to_string(),
            },
            CurveDefinition {
                mnemonic: "HC2".to_string(),
                unit: "PPM".to_string(),
                description: String::new(),
                category: "Hydrocarbons".to_string(),
            },
        ];
        let bundle = assemble_chat_context(&ChatContextParams {
            record: &record(),
            all_curves: &all_curves,
            selection: &selection,
            depth_min: 8000.0,
            depth_max: 8019.0,
            detail_level: 3,
            stats: &stats,
            rows: &data,
            message: "how does HC1 trend?",
            mentioned: &["HC1".to_string()],
            focus: &["HC1".to_string()],
        });
        assert!(bundle.data_context.contains("User-selected visualization scope"));
        assert!(bundle.data_context.contains("- Hydrocarbons: HC1"));
        assert!(bundle.data_context.contains("Focus curves for this reply: HC1"));
        assert!(bundle.data_context.contains("Important scope rule"));
    }

    #[test]
    fn interpretation_diagnostics_ranks_dominant_curves() {
        let data = rows(&(0..20).map(|i| 8000.0 + i as f64).collect::<Vec<_>>());
        let curves = vec!["HC1".to_string(), "HC2".to_string()];
        let stats = curve_statistics(&data, &curves);
        let text = build_interpretation_diagnostics(&stats, &data, &curves, 8000.0, 8019.0);
        assert!(text.contains("- Interval length: 19"));
        // HC1 spans 0..190, HC2 spans 81..100 — HC1 dominates.
        assert!(text.contains("Dominant-variance curves: HC1, HC2"));
        assert!(text.contains("Correlation HC1 vs HC2"));
    }

    #[test]
    fn sample_table_is_bounded() {
        let depths: Vec<f64> = (0..500).map(|i| 8000.0 + i as f64).collect();
        let data = rows(&depths);
        let table = format_sample_table(&data, &["HC1".to_string()]);
        assert!(table.lines().count() <= PROMPT_SAMPLE_ROWS + 2);
        assert!(table.starts_with("Depth | HC1"));
    }
}
