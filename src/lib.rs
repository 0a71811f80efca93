//! Mudscope: well-log gas chromatography intelligence
//!
//! Ingests LAS well-log files, indexes samples by depth, and answers
//! questions about the data through statistics, diagnostics, and an optional
//! generative backend with a deterministic fallback.
//!
//! ## Architecture
//!
//! - **Ingest**: LAS 2.0 parsing and curve taxonomy
//! - **Storage**: depth-indexed well store (sled or in-memory)
//! - **Analytics**: per-curve statistics plus trend/percentile/correlation diagnostics
//! - **Context**: curve selection and evidence-package assembly
//! - **Backend**: OpenAI-compatible chat completions (Groq or OpenAI)
//! - **Interpret**: deterministic interpretation when no backend answers
//! - **Pipeline**: the ingest/chat/interpretation operations the CLI exposes

pub mod analytics;
pub mod backend;
pub mod config;
pub mod context;
pub mod ingest;
pub mod interpret;
pub mod pipeline;
pub mod storage;
pub mod types;

// Re-export configuration
pub use config::AppConfig;

// Re-export core data types
pub use types::{
    CurveDefinition, DepthSample, GasShow, GeochemicalMetrics, Interpretation,
    InterpretationZone, ParsedLas, RiskProfile, SampleRow, WellId, WellInfo, WellRecord,
};

// Re-export storage
pub use storage::{InMemoryWellStore, SledWellStore, StoreError, WellStore};

// Re-export pipeline operations
pub use pipeline::{
    ingest_bytes, run_chat, run_interpretation, ChatOutcome, ChatRequest, IngestError,
    IngestReport, InterpretationOutcome, InterpretationRequest, QueryError,
};

// Re-export backend seam
pub use backend::{GenerativeBackend, OpenAiCompatBackend};
