//! Heuristic interpretation derived from statistics and row data alone.

use crate::analytics::{
    curve_pairs, high_response_zone, mean, CurveStats, INTERPRETATION_ANALYTICS_ROW_CAP,
    INTERPRETATION_HIGH_ZONE_MIN_POINTS,
};
use crate::types::{
    round_to, GasShow, GeochemicalMetrics, Interpretation, InterpretationZone, RiskProfile,
    SampleRow,
};
use std::collections::HashMap;

/// Wetness index band edges, from the standard geochemical definition
/// Wh = heavy / (light + heavy).
const WETNESS_DRY_GAS_MAX: f64 = 0.17;
const WETNESS_GAS_PRONE_MAX: f64 = 0.40;
const WETNESS_MIXED_MAX: f64 = 0.65;

/// Build a full interpretation without any generative backend.
///
/// Deterministic for fixed inputs. When no curve in the window carries valid
/// points the result is an explicit insufficient-data report with both risks
/// set to High, never a fabricated reading.
pub fn fallback_interpretation(
    well_name: &str,
    curves: &[String],
    depth_min: f64,
    depth_max: f64,
    statistics: &HashMap<String, CurveStats>,
    rows: &[SampleRow],
) -> Interpretation {
    let valid_curves: Vec<&String> = curves
        .iter()
        .filter(|c| statistics.get(c.as_str()).is_some_and(CurveStats::has_data))
        .collect();

    if valid_curves.is_empty() {
        return insufficient_data_report(well_name, depth_min, depth_max);
    }

    let stat_mean = |curve: &str| -> f64 {
        statistics
            .get(curve)
            .and_then(|s| s.mean)
            .unwrap_or(0.0)
    };

    let mut hydro_candidates: Vec<&String> = valid_curves
        .iter()
        .copied()
        .filter(|c| {
            let upper = c.to_uppercase();
            upper.contains("HC") || upper.contains("GAS") || upper.starts_with('C')
        })
        .collect();
    if hydro_candidates.is_empty() {
        let mut by_mean = valid_curves.clone();
        by_mean.sort_by(|a, b| {
            stat_mean(b)
                .partial_cmp(&stat_mean(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hydro_candidates = by_mean.into_iter().take(4).collect();
    }

    let mut ranked: Vec<&String> = hydro_candidates;
    ranked.sort_by(|a, b| {
        stat_mean(b)
            .partial_cmp(&stat_mean(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let primary = ranked[0].as_str();
    let secondary = ranked.get(1).map_or(primary, |c| c.as_str());

    let matches_any = |curve: &str, tags: &[&str]| {
        let upper = curve.to_uppercase();
        tags.iter().any(|t| upper.contains(t))
    };
    let total_light: f64 = ranked
        .iter()
        .filter(|c| matches_any(c, &["HC1", "HC2", "HC3"]))
        .map(|c| stat_mean(c))
        .sum();
    let total_heavy: f64 = ranked
        .iter()
        .filter(|c| matches_any(c, &["HC4", "HC5", "HC6", "HC7"]))
        .map(|c| stat_mean(c))
        .sum();

    let wetness = if total_light + total_heavy > 0.0 {
        total_heavy / (total_light + total_heavy)
    } else {
        0.0
    };
    let balance = if statistics.contains_key("TOTAL_GAS") {
        stat_mean("TOTAL_GAS") / stat_mean(primary).max(1e-9)
    } else {
        stat_mean(primary)
    };
    let character = if total_light > 0.0 {
        total_heavy / total_light.max(1e-9)
    } else {
        total_heavy
    };

    let fluid_type = if wetness <= WETNESS_DRY_GAS_MAX {
        "dry gas system"
    } else if wetness <= WETNESS_GAS_PRONE_MAX {
        "gas-prone hydrocarbon system"
    } else if wetness <= WETNESS_MIXED_MAX {
        "mixed gas and oil system"
    } else {
        "oil-prone or condensate-rich system"
    };

    let mut gas_shows = Vec::new();
    for (curve, confidence) in [(primary, "High"), (secondary, "Med")] {
        let pairs = curve_pairs(rows, curve, INTERPRETATION_ANALYTICS_ROW_CAP);
        let Some(zone) = high_response_zone(&pairs, INTERPRETATION_HIGH_ZONE_MIN_POINTS) else {
            continue;
        };
        gas_shows.push(GasShow {
            depth_top: round_to(zone.depth_top, 1),
            depth_bottom: round_to(zone.depth_bottom, 1),
            analysis: format!(
                "{curve} exceeds its high-response threshold ({}) indicating concentrated hydrocarbon response.",
                round_to(zone.threshold, 3)
            ),
            fluid_probability: confidence.to_string(),
            geological_context: format!(
                "High-response band driven by {curve} in this interval."
            ),
        });
    }

    // Three equal-width bands characterized by relative hydrocarbon intensity.
    let third = (depth_max - depth_min) / 3.0;
    let zone_bounds = [
        (depth_min, depth_min + third),
        (depth_min + third, depth_min + 2.0 * third),
        (depth_min + 2.0 * third, depth_max),
    ];
    let top_ranked: Vec<&str> = ranked.iter().take(3).map(|c| c.as_str()).collect();
    let intensities: Vec<f64> = zone_bounds
        .iter()
        .map(|&(a, b)| zone_intensity(rows, &top_ranked, a, b))
        .collect();
    let overall_intensity = mean(&intensities).unwrap_or(0.0);

    let mut zones = Vec::with_capacity(3);
    for (&(start, end), &intensity) in zone_bounds.iter().zip(intensities.iter()) {
        let relative = if overall_intensity > 0.0 {
            intensity / overall_intensity.max(1e-9)
        } else {
            0.0
        };
        let label = if relative >= 1.2 {
            "gas-enriched zone"
        } else if relative >= 0.85 {
            "mixed fluid zone"
        } else {
            "lower-intensity hydrocarbon zone"
        };
        zones.push(InterpretationZone {
            depth_top: round_to(start, 1),
            depth_bottom: round_to(end, 1),
            characterization: label.to_string(),
            key_markers: format!(
                "Relative hydrocarbon intensity={} using {}",
                round_to(relative, 2),
                top_ranked.join(", ")
            ),
        });
    }

    let primary_stats = statistics.get(primary);
    let p_min = primary_stats.and_then(|s| s.min).unwrap_or(0.0);
    let p_max = primary_stats.and_then(|s| s.max).unwrap_or(0.0);
    let p_mean = primary_stats.and_then(|s| s.mean).unwrap_or(0.0).max(1e-9);
    let variability = (p_max - p_min) / p_mean;
    let shallow = intensities[0];
    let deep = intensities[2];

    let seal_risk = if variability > 2.2 {
        "High"
    } else if variability > 1.2 {
        "Med"
    } else {
        "Low"
    };
    let saturation_risk = if deep < 0.55 * shallow.max(1e-9) {
        "High"
    } else if deep < 0.8 * shallow.max(1e-9) {
        "Med"
    } else {
        "Low"
    };

    Interpretation {
        summary: format!(
            "In {}-{}, strongest responses are driven by {primary} (mean {}) and {secondary} (mean {}), with inferred {fluid_type}.",
            round_to(depth_min, 1),
            round_to(depth_max, 1),
            round_to(stat_mean(primary), 3),
            round_to(stat_mean(secondary), 3),
        ),
        geochemical_metrics: GeochemicalMetrics {
            wetness_index: format!("{} (derived)", round_to(wetness, 4)),
            balance_ratio: format!("{} (derived)", round_to(balance, 4)),
            character_ratio: format!("{} (derived)", round_to(character, 4)),
        },
        gas_shows,
        fluid_type: fluid_type.to_string(),
        fluid_evidence: format!(
            "Primary evidence: {primary} and {secondary} high-response intervals, wetness index {}, and variability ratio {}.",
            round_to(wetness, 3),
            round_to(variability, 3),
        ),
        risk_profile: RiskProfile {
            seal_risk: seal_risk.to_string(),
            saturation_risk: saturation_risk.to_string(),
            technical_summary: format!(
                "Seal risk {seal_risk} and saturation risk {saturation_risk} derived from {primary} variability and deep-to-shallow intensity contrast."
            ),
        },
        zones,
        recommendations: vec![
            format!(
                "Validate {primary} and {secondary} with complementary petrophysical logs."
            ),
            "Run focused sampling/coring across highest-response intervals to confirm fluid typing."
                .to_string(),
            "Cross-check drilling parameters versus hydrocarbon intensity transitions between zones."
                .to_string(),
        ],
    }
}

/// Mean of the per-row average of the leading hydrocarbon curves inside a
/// depth band. Zero when the band holds no usable rows.
fn zone_intensity(rows: &[SampleRow], curves: &[&str], start: f64, end: f64) -> f64 {
    let mut row_means = Vec::new();
    for row in rows {
        if row.depth < start || row.depth > end {
            continue;
        }
        let values: Vec<f64> = curves.iter().filter_map(|c| row.value(c)).collect();
        if let Some(m) = mean(&values) {
            row_means.push(m);
        }
    }
    mean(&row_means).unwrap_or(0.0)
}

fn insufficient_data_report(well_name: &str, depth_min: f64, depth_max: f64) -> Interpretation {
    Interpretation {
        summary: format!(
            "No valid numeric samples were found in {depth_min}-{depth_max} for well '{well_name}'."
        ),
        geochemical_metrics: GeochemicalMetrics {
            wetness_index: "n/a, insufficient data".to_string(),
            balance_ratio: "n/a, insufficient data".to_string(),
            character_ratio: "n/a, insufficient data".to_string(),
        },
        gas_shows: Vec::new(),
        fluid_type: "insufficient data".to_string(),
        fluid_evidence: "No curves with valid points were available in the selected interval."
            .to_string(),
        risk_profile: RiskProfile {
            seal_risk: "High".to_string(),
            saturation_risk: "High".to_string(),
            technical_summary:
                "Interpretation confidence is low due to missing valid curve values.".to_string(),
        },
        zones: Vec::new(),
        recommendations: vec![
            "Verify data quality and null-value handling for the selected interval.".to_string(),
            "Expand depth interval or include additional valid curves before interpretation."
                .to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::curve_statistics;

    fn rows_with(
        depths: &[f64],
        curves: &[(&str, fn(usize) -> Option<f64>)],
    ) -> Vec<SampleRow> {
        depths
            .iter()
            .enumerate()
            .map(|(i, &depth)| {
                let mut values = HashMap::new();
                for (name, f) in curves {
                    values.insert(name.to_string(), f(i));
                }
                SampleRow { depth, values }
            })
            .collect()
    }

    #[test]
    fn empty_window_yields_insufficient_data_report() {
        let curves = vec!["HC1".to_string()];
        let rows = rows_with(&[100.0, 101.0], &[("HC1", |_| None)]);
        let stats = curve_statistics(&rows, &curves);
        let interp = fallback_interpretation("W1", &curves, 100.0, 101.0, &stats, &rows);
        assert_eq!(interp.fluid_type, "insufficient data");
        assert_eq!(interp.risk_profile.seal_risk, "High");
        assert_eq!(interp.risk_profile.saturation_risk, "High");
        assert!(interp.zones.is_empty());
        assert!(interp.gas_shows.is_empty());
        assert_eq!(interp.recommendations.len(), 2);
    }

    #[test]
    fn light_dominated_means_classify_as_dry_gas() {
        let depths: Vec<f64> = (0..30).map(|i| 8000.0 + i as f64).collect();
        let rows = rows_with(
            &depths,
            &[
                ("HC1", |_| Some(1000.0)),
                ("HC4", |_| Some(50.0)),
            ],
        );
        let curves = vec!["HC1".to_string(), "HC4".to_string()];
        let stats = curve_statistics(&rows, &curves);
        let interp = fallback_interpretation("W1", &curves, 8000.0, 8029.0, &stats, &rows);
        // wetness = 50 / 1050 ≈ 0.048
        assert_eq!(interp.fluid_type, "dry gas system");
        assert!(interp.geochemical_metrics.wetness_index.contains("0.0476"));
    }

    #[test]
    fn heavy_dominated_means_classify_as_oil_prone() {
        let depths: Vec<f64> = (0..30).map(|i| 8000.0 + i as f64).collect();
        let rows = rows_with(
            &depths,
            &[
                ("HC1", |_| Some(10.0)),
                ("HC5", |_| Some(90.0)),
            ],
        );
        let curves = vec!["HC1".to_string(), "HC5".to_string()];
        let stats = curve_statistics(&rows, &curves);
        let interp = fallback_interpretation("W1", &curves, 8000.0, 8029.0, &stats, &rows);
        assert_eq!(interp.fluid_type, "oil-prone or condensate-rich system");
    }

    #[test]
    fn produces_three_zones_spanning_the_window() {
        let depths: Vec<f64> = (0..60).map(|i| 9000.0 + i as f64).collect();
        let rows = rows_with(&depths, &[("TOTAL_GAS", |i| Some(i as f64 * 2.0))]);
        let curves = vec!["TOTAL_GAS".to_string()];
        let stats = curve_statistics(&rows, &curves);
        let interp = fallback_interpretation("W1", &curves, 9000.0, 9059.0, &stats, &rows);
        assert_eq!(interp.zones.len(), 3);
        assert_eq!(interp.zones[0].depth_top, 9000.0);
        assert_eq!(interp.zones[2].depth_bottom, 9059.0);
        // Rising signal concentrates intensity in the deepest band.
        assert_eq!(interp.zones[2].characterization, "gas-enriched zone");
    }

    #[test]
    fn gas_shows_come_from_high_response_zones() {
        let depths: Vec<f64> = (0..40).map(|i| 5000.0 + i as f64).collect();
        let rows = rows_with(
            &depths,
            &[("HC1", |i| Some(if i >= 35 { 500.0 } else { 10.0 }))],
        );
        let curves = vec!["HC1".to_string()];
        let stats = curve_statistics(&rows, &curves);
        let interp = fallback_interpretation("W1", &curves, 5000.0, 5039.0, &stats, &rows);
        // primary == secondary for a single curve, so only one distinct zone
        // but the loop emits it twice (High then Med), matching the ranking.
        assert!(!interp.gas_shows.is_empty());
        assert_eq!(interp.gas_shows[0].fluid_probability, "High");
        assert!(interp.gas_shows[0].depth_top >= 5035.0);
    }

    #[test]
    fn non_hydrocarbon_curves_fall_back_to_top_means() {
        let depths: Vec<f64> = (0..30).map(|i| 8000.0 + i as f64).collect();
        let rows = rows_with(
            &depths,
            &[("ROP(ft/hr)", |_| Some(120.0)), ("WOB", |_| Some(15.0))],
        );
        let curves = vec!["ROP(ft/hr)".to_string(), "WOB".to_string()];
        let stats = curve_statistics(&rows, &curves);
        let interp = fallback_interpretation("W1", &curves, 8000.0, 8029.0, &stats, &rows);
        assert!(interp.summary.contains("ROP(ft/hr)"));
        // No HC1-7 channels at all: wetness 0 → dry gas bucket.
        assert_eq!(interp.fluid_type, "dry gas system");
    }

    #[test]
    fn saturation_risk_rises_when_deep_zone_weakens() {
        let depths: Vec<f64> = (0..60).map(|i| 9000.0 + i as f64).collect();
        let rows = rows_with(
            &depths,
            &[("HC1", |i| Some(if i < 20 { 100.0 } else { 10.0 }))],
        );
        let curves = vec!["HC1".to_string()];
        let stats = curve_statistics(&rows, &curves);
        let interp = fallback_interpretation("W1", &curves, 9000.0, 9059.0, &stats, &rows);
        assert_eq!(interp.risk_profile.saturation_risk, "High");
    }
}
