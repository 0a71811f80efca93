//! Interpretation of selected curves over a depth interval.

use super::QueryError;
use crate::analytics::{curve_statistics, CurveStats};
use crate::backend::{
    build_interpretation_prompt, extract_json_object, ChatMessage, CompletionRequest,
    GenerativeBackend, INTERPRETATION_MAX_TOKENS, INTERPRETATION_SYSTEM_PROMPT,
    INTERPRETATION_TEMPERATURE,
};
use crate::context::{build_interpretation_diagnostics, format_sample_table};
use crate::interpret::fallback_interpretation;
use crate::storage::WellStore;
use crate::types::{Interpretation, WellId};
use serde::Serialize;
use std::collections::HashMap;

/// One interpretation request against a stored well.
#[derive(Debug, Clone)]
pub struct InterpretationRequest<'a> {
    pub well_name: &'a str,
    pub curves: &'a [String],
    pub depth_min: f64,
    pub depth_max: f64,
}

/// Where the interpretation content came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpretationSource {
    Backend,
    Deterministic,
}

/// Interpretation plus the validated scope it covers.
#[derive(Debug, Clone, Serialize)]
pub struct InterpretationOutcome {
    pub well_id: WellId,
    pub well_name: String,
    pub depth_min: f64,
    pub depth_max: f64,
    pub depth_unit: String,
    pub curves_analyzed: Vec<String>,
    pub source: InterpretationSource,
    pub interpretation: Interpretation,
}

/// Interpret the requested curves over a depth interval.
///
/// Curves must all exist on the well and the interval must be non-degenerate;
/// both are hard errors. Backend failure of any kind (no backend, transport,
/// unparseable output) is not: the deterministic interpreter answers instead.
pub async fn run_interpretation(
    store: &dyn WellStore,
    backend: Option<&dyn GenerativeBackend>,
    request: InterpretationRequest<'_>,
) -> Result<InterpretationOutcome, QueryError> {
    let record = store
        .find_by_name(request.well_name)?
        .ok_or(QueryError::WellNotFound)?;

    let available: Vec<String> = store
        .curves(record.id)?
        .into_iter()
        .map(|c| c.mnemonic)
        .collect();
    let unknown: Vec<String> = request
        .curves
        .iter()
        .filter(|c| !available.contains(c))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(QueryError::UnknownCurves(unknown));
    }
    if request.depth_min >= request.depth_max {
        return Err(QueryError::InvalidRange {
            depth_min: request.depth_min,
            depth_max: request.depth_max,
        });
    }

    let curves = request.curves.to_vec();
    let rows = store.query_samples(
        record.id,
        &curves,
        Some(request.depth_min),
        Some(request.depth_max),
    )?;
    let stats = curve_statistics(&rows, &curves);

    let mut source = InterpretationSource::Deterministic;
    let mut interpretation = None;

    if let Some(backend) = backend {
        let prompt = build_interpretation_prompt(
            &record.info.well_name,
            request.depth_min,
            request.depth_max,
            &format_prompt_statistics(&curves, &stats),
            &format_sample_table(&rows, &curves),
            &build_interpretation_diagnostics(
                &stats,
                &rows,
                &curves,
                request.depth_min,
                request.depth_max,
            ),
        );
        match call_backend(backend, prompt).await {
            Some(parsed) => {
                source = InterpretationSource::Backend;
                interpretation = Some(parsed);
            }
            None => {
                tracing::warn!(
                    provider = backend.provider_name(),
                    well = %record.info.well_name,
                    "backend interpretation unavailable, using deterministic fallback"
                );
            }
        }
    }

    let interpretation = interpretation.unwrap_or_else(|| {
        fallback_interpretation(
            &record.info.well_name,
            &curves,
            request.depth_min,
            request.depth_max,
            &stats,
            &rows,
        )
    });

    Ok(InterpretationOutcome {
        well_id: record.id,
        well_name: record.info.well_name.clone(),
        depth_min: request.depth_min,
        depth_max: request.depth_max,
        depth_unit: record.info.depth_unit.clone(),
        curves_analyzed: curves,
        source,
        interpretation,
    })
}

async fn call_backend(backend: &dyn GenerativeBackend, prompt: String) -> Option<Interpretation> {
    let completion = backend
        .complete(CompletionRequest {
            messages: vec![
                ChatMessage::system(INTERPRETATION_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ],
            temperature: INTERPRETATION_TEMPERATURE,
            max_tokens: INTERPRETATION_MAX_TOKENS,
        })
        .await;

    let text = match completion {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(provider = backend.provider_name(), error = %e, "interpretation call failed");
            return None;
        }
    };
    let value = extract_json_object(&text)?;
    match serde_json::from_value::<Interpretation>(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::error!(provider = backend.provider_name(), error = %e, "interpretation JSON did not match schema");
            None
        }
    }
}

/// Statistics lines for the interpretation prompt.
fn format_prompt_statistics(curves: &[String], stats: &HashMap<String, CurveStats>) -> String {
    let mut lines = Vec::with_capacity(curves.len());
    for curve in curves {
        match stats.get(curve) {
            Some(s) if s.has_data() => {
                if let (Some(min), Some(max), Some(mean)) = (s.min, s.max, s.mean) {
                    lines.push(format!(
                        "  {curve}: min={min}, max={max}, mean={mean}, points={}",
                        s.non_null_count
                    ));
                }
            }
            _ => lines.push(format!("  {curve}: no valid data")),
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::ingest::parse_las;
    use crate::storage::InMemoryWellStore;
    use async_trait::async_trait;

    const LAS: &str = "\
~Version
 VERS.   2.0 : Standard
 WRAP.   NO  : No wrap
~Well
 STRT.F  200.0000 : START
 STOP.F  239.0000 : STOP
 STEP.F  1.0000   : STEP
 NULL.   -999.25  : NULL
 WELL.   INTERP WELL : NAME
~Curve
 DEPT.F      : Depth
 HC1.PPM     : Methane
 HC5.PPM     : Pentane
~ASCII
";

    fn seeded_store() -> InMemoryWellStore {
        let mut text = LAS.to_string();
        for i in 0..40 {
            text.push_str(&format!(" {}.0 {}.0 {}.0\n", 200 + i, 100 + i, 5 + i));
        }
        let store = InMemoryWellStore::new();
        let parsed = parse_las(text.as_bytes()).unwrap();
        store.put_well(&parsed, None).unwrap();
        store
    }

    struct CannedBackend(&'static str);

    #[async_trait]
    impl GenerativeBackend for CannedBackend {
        fn provider_name(&self) -> &str {
            "TEST"
        }

        async fn complete(&self, _request: CompletionRequest) -> Result<String, BackendError> {
            Ok(self.0.to_string())
        }
    }

    fn request<'a>(curves: &'a [String]) -> InterpretationRequest<'a> {
        InterpretationRequest {
            well_name: "INTERP WELL",
            curves,
            depth_min: 200.0,
            depth_max: 239.0,
        }
    }

    #[tokio::test]
    async fn unknown_curves_are_rejected() {
        let store = seeded_store();
        let curves = vec!["HC1".to_string(), "BOGUS".to_string()];
        let result = run_interpretation(&store, None, request(&curves)).await;
        match result {
            Err(QueryError::UnknownCurves(unknown)) => {
                assert_eq!(unknown, vec!["BOGUS".to_string()]);
            }
            other => panic!("expected UnknownCurves, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn degenerate_interval_is_rejected() {
        let store = seeded_store();
        let curves = vec!["HC1".to_string()];
        let result = run_interpretation(
            &store,
            None,
            InterpretationRequest {
                well_name: "INTERP WELL",
                curves: &curves,
                depth_min: 230.0,
                depth_max: 230.0,
            },
        )
        .await;
        assert!(matches!(result, Err(QueryError::InvalidRange { .. })));
    }

    #[tokio::test]
    async fn no_backend_falls_back_deterministically() {
        let store = seeded_store();
        let curves = vec!["HC1".to_string(), "HC5".to_string()];
        let outcome = run_interpretation(&store, None, request(&curves)).await.unwrap();
        assert_eq!(outcome.source, InterpretationSource::Deterministic);
        assert_eq!(outcome.interpretation.zones.len(), 3);
        assert!(!outcome.interpretation.fluid_type.is_empty());
    }

    #[tokio::test]
    async fn backend_json_is_used_when_valid() {
        let store = seeded_store();
        let curves = vec!["HC1".to_string()];
        let backend = CannedBackend(
            r#"```json
{"summary": "model summary", "fluid_type": "dry gas system"}
```"#,
        );
        let outcome = run_interpretation(&store, Some(&backend), request(&curves))
            .await
            .unwrap();
        assert_eq!(outcome.source, InterpretationSource::Backend);
        assert_eq!(outcome.interpretation.summary, "model summary");
        // Absent sections default instead of failing deserialization.
        assert!(outcome.interpretation.zones.is_empty());
    }

    #[tokio::test]
    async fn unparseable_backend_output_falls_back() {
        let store = seeded_store();
        let curves = vec!["HC1".to_string()];
        let backend = CannedBackend("not json at all");
        let outcome = run_interpretation(&store, Some(&backend), request(&curves))
            .await
            .unwrap();
        assert_eq!(outcome.source, InterpretationSource::Deterministic);
        assert!(outcome.interpretation.summary.contains("HC1"));
    }
}
