//! End-to-end operations: ingest, chat, interpretation.
//!
//! These functions are the seams the CLI (or any other surface) calls. Each
//! one validates its inputs against the store, runs the analytics it needs,
//! and degrades deterministically when no generative backend is available.

mod chat;
mod ingest;
mod interpretation;

pub use chat::{run_chat, ChatOutcome, ChatRequest};
pub use ingest::{ingest_bytes, IngestError, IngestReport};
pub use interpretation::{
    run_interpretation, InterpretationOutcome, InterpretationRequest, InterpretationSource,
};

use crate::storage::StoreError;
use thiserror::Error;

/// Failures of a validated query against a stored well.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("well not found")]
    WellNotFound,

    #[error("invalid curves: {}", .0.join(", "))]
    UnknownCurves(Vec<String>),

    #[error("depth_min must be less than depth_max ({depth_min} >= {depth_max})")]
    InvalidRange { depth_min: f64, depth_max: f64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}
