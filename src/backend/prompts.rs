//! Prompt templates and response text cleanup.

use regex::Regex;
use std::sync::OnceLock;

/// Fixed reply when no backend is configured for chat.
pub const CHAT_UNAVAILABLE_TEXT: &str =
    "AI chatbot is not available. Please configure GROQ_API_KEY or OPENAI_API_KEY.";

/// Response shaping per detail level.
#[derive(Debug, Clone, Copy)]
pub struct DetailProfile {
    pub length: &'static str,
    pub bullets: &'static str,
}

/// Profile for a detail level; out-of-range input clamps into 1..=5.
pub fn detail_profile(detail_level: u8) -> DetailProfile {
    match detail_level.clamp(1, 5) {
        1 => DetailProfile {
            length: "80-120 words",
            bullets: "2 to 3",
        },
        2 => DetailProfile {
            length: "100-160 words",
            bullets: "3 to 4",
        },
        3 => DetailProfile {
            length: "120-220 words",
            bullets: "3 to 5",
        },
        4 => DetailProfile {
            length: "180-300 words",
            bullets: "4 to 6",
        },
        _ => DetailProfile {
            length: "240-420 words",
            bullets: "5 to 8",
        },
    }
}

/// System prompt for the chat path, carrying the evidence package and
/// response-shaping rules for the requested detail level.
pub fn build_chat_system_prompt(
    well_summary: &str,
    data_context: &str,
    detail_level: u8,
) -> String {
    let level = detail_level.clamp(1, 5);
    let profile = detail_profile(level);
    format!(
        r#"You are a senior well-log analysis assistant for engineering users.

Use well_summary and data_context as the only trusted evidence source.

Behavior rules:
1. Prioritize question-specific context and focus analytics over generic summary.
2. Do not repeat the same template language across turns.
3. Do not restate full curve inventory unless user explicitly asks for it.
4. Provide the strongest data-backed finding first, then supporting evidence.
5. If user asks a broad question, still provide concrete ranked findings (top 2-3) rather than generic overview.
6. If evidence is weak, say exactly what is missing.

Answer style:
- First line: "Key finding: <direct conclusion>"
- Then {bullets} concise bullets with concrete numbers (depth, min/max, mean, trend, correlation).
- End with one line: "Action: <specific next analysis/check>".
- Keep answers sharp and technical; avoid filler.
- Target response length: {length} unless user explicitly asks otherwise.
- Respect requested detail level = {level} out of 5.

Well summary:
{well_summary}

Data context:
{data_context}
"#,
        bullets = profile.bullets,
        length = profile.length,
    )
}

/// System message for the interpretation call.
pub const INTERPRETATION_SYSTEM_PROMPT: &str = "You are a precise geochemical analyst. \
     Always return valid JSON with evidence-driven, non-generic conclusions.";

/// User prompt for the interpretation call: evidence blocks plus the strict
/// JSON schema the response must follow.
pub fn build_interpretation_prompt(
    well_name: &str,
    depth_min: f64,
    depth_max: f64,
    stats_text: &str,
    sample_text: &str,
    diagnostics_text: &str,
) -> String {
    format!(
        r#"You are a senior well-log geochemistry analyst producing high-confidence technical interpretation.

Well: {well_name}
Depth interval: {depth_min} to {depth_max}

Use the curve statistics, sampled rows, and derived diagnostics below.
Do not produce generic statements; every section must anchor to numbers, curve mnemonics, and depth intervals.

Interpretation requirements:
1. Identify strongest hydrocarbon-response intervals with exact depth ranges.
2. Distinguish primary fluid tendency and explain with evidence from multiple curves.
3. Provide risk profile with explicit technical rationale.
4. Segment 2 to 4 non-overlapping zones with clear characterization.
5. Recommendations must be concrete, not generic.
6. Avoid vague phrasing like "varying strength" without quantified evidence.
7. Ensure output differs when input curves/depth interval differ.

Curve statistics:
{stats_text}

Sampled data:
{sample_text}

Derived diagnostics:
{diagnostics_text}

Return strict JSON with this schema:
{{
  "summary": "strong technical summary with explicit interval and curve evidence",
  "geochemical_metrics": {{
    "wetness_index": "value and interpretation",
    "balance_ratio": "value and interpretation",
    "character_ratio": "value and interpretation"
  }},
  "gas_shows": [
    {{
      "depth_top": float,
      "depth_bottom": float,
      "analysis": "what the data suggests",
      "fluid_probability": "High/Med/Low",
      "geological_context": "brief context"
    }}
  ],
  "fluid_type": "primary fluid interpretation",
  "fluid_evidence": "key evidence from curves and ratios",
  "risk_profile": {{
    "seal_risk": "Low/Med/High",
    "saturation_risk": "Low/Med/High",
    "technical_summary": "single-sentence risk summary"
  }},
  "zones": [
    {{
      "depth_top": float,
      "depth_bottom": float,
      "characterization": "zone label",
      "key_markers": "key markers"
    }}
  ],
  "recommendations": ["clear recommendation"]
}}

Return raw JSON only. Do not include markdown or prose outside JSON.
"#
    )
}

/// Normalize a chat reply: CRLF to LF, collapse 3+ blank lines and repeated
/// spaces/tabs.
pub fn clean_chat_text(text: &str) -> String {
    if text.is_empty() {
        return "No response was generated.".to_string();
    }
    static BLANK_RUNS: OnceLock<Regex> = OnceLock::new();
    static SPACE_RUNS: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    let blank_runs =
        BLANK_RUNS.get_or_init(|| Regex::new(r"\n{3,}").expect("static pattern compiles"));
    #[allow(clippy::expect_used)]
    let space_runs =
        SPACE_RUNS.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("static pattern compiles"));

    let cleaned = text.replace("\r\n", "\n");
    let cleaned = cleaned.trim();
    let cleaned = blank_runs.replace_all(cleaned, "\n\n");
    space_runs.replace_all(&cleaned, " ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_profiles_clamp_out_of_range_levels() {
        assert_eq!(detail_profile(0).length, "80-120 words");
        assert_eq!(detail_profile(3).bullets, "3 to 5");
        assert_eq!(detail_profile(9).length, "240-420 words");
    }

    #[test]
    fn chat_prompt_embeds_context_and_level() {
        let prompt = build_chat_system_prompt("Well: X", "scope data", 4);
        assert!(prompt.contains("Well: X"));
        assert!(prompt.contains("scope data"));
        assert!(prompt.contains("detail level = 4 out of 5"));
        assert!(prompt.contains("180-300 words"));
    }

    #[test]
    fn interpretation_prompt_carries_schema_and_evidence() {
        let prompt =
            build_interpretation_prompt("WELL-7", 8000.0, 9000.0, "stats", "samples", "diag");
        assert!(prompt.contains("Well: WELL-7"));
        assert!(prompt.contains("Depth interval: 8000 to 9000"));
        assert!(prompt.contains("\"gas_shows\""));
        assert!(prompt.contains("Return raw JSON only"));
    }

    #[test]
    fn chat_text_cleanup_collapses_noise() {
        assert_eq!(
            clean_chat_text("a\r\n\n\n\nb   c\t\td"),
            "a\n\nb c d"
        );
        assert_eq!(clean_chat_text(""), "No response was generated.");
    }
}
