//! Statistics and diagnostics over depth-indexed curve data.
//!
//! Everything here is a pure function of its inputs. Numeric edge cases
//! (empty windows, zero variance, too few points) resolve to `None` or an
//! explicit insufficient-data label, never a panic.

pub mod diagnostics;
pub mod statistics;

pub use diagnostics::{
    correlation_strength, curve_pairs, high_response_zone, mean, pearson, percentile, trend,
    Trend, CHAT_ANALYTICS_ROW_CAP, CHAT_HIGH_ZONE_MIN_POINTS, DIAGNOSTICS_MIN_POINTS,
    INTERPRETATION_ANALYTICS_ROW_CAP, INTERPRETATION_HIGH_ZONE_MIN_POINTS,
};
pub use statistics::{curve_statistics, CurveStats};
