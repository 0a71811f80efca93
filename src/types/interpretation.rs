//! Structured interpretation schema.
//!
//! This is the fixed shape both the generative backend and the deterministic
//! fallback must produce. All fields default so that a backend response with a
//! missing section still deserializes instead of discarding the whole object.

use serde::{Deserialize, Serialize};

/// Full interpretation of a depth window over a curve set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Interpretation {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub geochemical_metrics: GeochemicalMetrics,
    #[serde(default)]
    pub gas_shows: Vec<GasShow>,
    #[serde(default)]
    pub fluid_type: String,
    #[serde(default)]
    pub fluid_evidence: String,
    #[serde(default)]
    pub risk_profile: RiskProfile,
    #[serde(default)]
    pub zones: Vec<InterpretationZone>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Derived geochemical indices, formatted with their interpretation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeochemicalMetrics {
    #[serde(default)]
    pub wetness_index: String,
    #[serde(default)]
    pub balance_ratio: String,
    #[serde(default)]
    pub character_ratio: String,
}

/// A concentrated hydrocarbon response interval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GasShow {
    #[serde(default)]
    pub depth_top: f64,
    #[serde(default)]
    pub depth_bottom: f64,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub fluid_probability: String,
    #[serde(default)]
    pub geological_context: String,
}

/// Seal and saturation risk assessment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskProfile {
    #[serde(default)]
    pub seal_risk: String,
    #[serde(default)]
    pub saturation_risk: String,
    #[serde(default)]
    pub technical_summary: String,
}

/// One characterized depth band.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterpretationZone {
    #[serde(default)]
    pub depth_top: f64,
    #[serde(default)]
    pub depth_bottom: f64,
    #[serde(default)]
    pub characterization: String,
    #[serde(default)]
    pub key_markers: String,
}
