//! Core data model for parsed well logs and derived interpretation output.
//!
//! - `WellInfo` / `CurveDefinition` / `DepthSample`: parser output, one well
//!   per LAS file.
//! - `WellRecord` / `SampleRow`: store-side records and query rows.
//! - `Interpretation`: the fixed JSON schema shared by the generative backend
//!   and the deterministic fallback interpreter.

mod interpretation;
mod well;

pub use interpretation::{
    GasShow, GeochemicalMetrics, Interpretation, InterpretationZone, RiskProfile,
};
pub use well::{CurveDefinition, DepthSample, ParsedLas, SampleRow, WellId, WellInfo, WellRecord};

/// Round to 4 decimal digits — the precision all ingested depths and curve
/// values are normalized to.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Round to a given number of decimal digits (presentation output).
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}
