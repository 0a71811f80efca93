//! Curve selection and textual context assembly for backend calls.

pub mod assembler;
pub mod selector;

pub use assembler::{
    assemble_chat_context, build_interpretation_diagnostics, build_query_analytics,
    build_well_summary, format_sample_table, format_stats_text, ChatContextParams, ContextBundle,
};
pub use selector::{
    extract_mentioned_curves, normalize_depth_range, pick_focus_curves, select_context_curves,
    CurveSelection, SelectionMode, DEFAULT_CONTEXT_CURVES, MAX_CONTEXT_CURVES, MAX_FOCUS_CURVES,
};
