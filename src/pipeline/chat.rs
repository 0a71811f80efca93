//! Scoped chat over a stored well.

use super::QueryError;
use crate::analytics::curve_statistics;
use crate::backend::{
    build_chat_system_prompt, chat_max_tokens, chat_temperature, clean_chat_text, ChatMessage,
    CompletionRequest, GenerativeBackend, CHAT_HISTORY_LIMIT, CHAT_UNAVAILABLE_TEXT,
};
use crate::context::{
    assemble_chat_context, extract_mentioned_curves, normalize_depth_range, pick_focus_curves,
    select_context_curves, ChatContextParams, SelectionMode, MAX_FOCUS_CURVES,
};
use crate::storage::WellStore;
use crate::types::WellId;

/// One chat turn against a stored well.
#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    pub well_name: &'a str,
    pub message: &'a str,
    pub history: &'a [ChatMessage],
    pub requested_curves: &'a [String],
    pub depth_min: Option<f64>,
    pub depth_max: Option<f64>,
    pub detail_level: u8,
}

/// Reply plus the scope that produced it.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub well_id: WellId,
    pub reply: String,
    pub curves_in_scope: Vec<String>,
    pub ignored_curves: Vec<String>,
    pub selection_mode: SelectionMode,
    pub focus_curves: Vec<String>,
    pub depth_min: f64,
    pub depth_max: f64,
}

/// Run one chat turn: resolve scope, compute analytics, assemble context,
/// call the backend. Without a backend the reply is a fixed unavailable
/// notice; the scope work still happens so the outcome remains inspectable.
pub async fn run_chat(
    store: &dyn WellStore,
    backend: Option<&dyn GenerativeBackend>,
    request: ChatRequest<'_>,
) -> Result<ChatOutcome, QueryError> {
    let record = store
        .find_by_name(request.well_name)?
        .ok_or(QueryError::WellNotFound)?;
    let all_curves = store.curves(record.id)?;
    let curve_names: Vec<String> = all_curves.iter().map(|c| c.mnemonic.clone()).collect();

    let selection = select_context_curves(request.requested_curves, &curve_names);
    let (depth_min, depth_max) =
        normalize_depth_range(request.depth_min, request.depth_max, &record.info);

    let rows = store.query_samples(
        record.id,
        &selection.analyzed,
        Some(depth_min),
        Some(depth_max),
    )?;
    let stats = curve_statistics(&rows, &selection.analyzed);

    let mentioned = extract_mentioned_curves(request.message, &curve_names);
    let focus = pick_focus_curves(&mentioned, &selection.analyzed, &stats, MAX_FOCUS_CURVES);

    let detail_level = request.detail_level.clamp(1, 5);
    let bundle = assemble_chat_context(&ChatContextParams {
        record: &record,
        all_curves: &all_curves,
        selection: &selection,
        depth_min,
        depth_max,
        detail_level,
        stats: &stats,
        rows: &rows,
        message: request.message,
        mentioned: &mentioned,
        focus: &focus,
    });

    let reply = match backend {
        None => CHAT_UNAVAILABLE_TEXT.to_string(),
        Some(backend) => {
            let system =
                build_chat_system_prompt(&bundle.well_summary, &bundle.data_context, detail_level);
            let mut messages = Vec::with_capacity(request.history.len().min(CHAT_HISTORY_LIMIT) + 2);
            messages.push(ChatMessage::system(system));
            let skip = request.history.len().saturating_sub(CHAT_HISTORY_LIMIT);
            messages.extend(request.history.iter().skip(skip).cloned());
            messages.push(ChatMessage::user(request.message));

            let completion = backend
                .complete(CompletionRequest {
                    messages,
                    temperature: chat_temperature(detail_level),
                    max_tokens: chat_max_tokens(detail_level),
                })
                .await;
            match completion {
                Ok(text) => clean_chat_text(&text),
                Err(e) => {
                    tracing::error!(provider = backend.provider_name(), error = %e, "chat completion failed");
                    if e.is_quota_exhausted() {
                        "AI chat is unavailable because API quota is exhausted. Please check your API key and quota.".to_string()
                    } else {
                        format!(
                            "AI chat is unavailable due to a {} API error.",
                            backend.provider_name()
                        )
                    }
                }
            }
        }
    };

    Ok(ChatOutcome {
        well_id: record.id,
        reply,
        curves_in_scope: selection.analyzed,
        ignored_curves: selection.ignored,
        selection_mode: selection.mode,
        focus_curves: focus,
        depth_min,
        depth_max,
    })
}
