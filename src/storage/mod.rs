//! Depth-indexed well storage behind a pluggable trait.
//!
//! Two implementations:
//! - `SledWellStore`: durable embedded store for deployments
//! - `InMemoryWellStore`: for tests and minimal setups
//!
//! Replacement semantics: `put_well` on a well_name that already exists
//! replaces the prior well and everything it owns. The new well is written
//! completely under a fresh id before the name pointer is swapped, so readers
//! resolving by name never observe a partially-replaced well.

mod memory;
mod sled_store;

pub use memory::InMemoryWellStore;
pub use sled_store::SledWellStore;

use crate::types::{CurveDefinition, ParsedLas, SampleRow, WellId, WellRecord};
use thiserror::Error;

/// Storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Persistence boundary consumed by the analytics pipeline.
///
/// Implementations must be thread-safe (Send + Sync) for shared access
/// across async tasks.
pub trait WellStore: Send + Sync {
    /// Store a parsed well, replacing any existing well of the same name.
    fn put_well(&self, parsed: &ParsedLas, source_file: Option<&str>)
        -> Result<WellId, StoreError>;

    /// Well metadata by id.
    fn get_well(&self, id: WellId) -> Result<Option<WellRecord>, StoreError>;

    /// Well metadata by exact well name.
    fn find_by_name(&self, name: &str) -> Result<Option<WellRecord>, StoreError>;

    /// All stored wells, most recently uploaded first.
    fn list_wells(&self) -> Result<Vec<WellRecord>, StoreError>;

    /// Curve definitions for a well (empty when the well is unknown).
    fn curves(&self, id: WellId) -> Result<Vec<CurveDefinition>, StoreError>;

    /// Depth-range query, ascending by depth, inclusive bounds.
    ///
    /// An omitted bound defaults to the well's full extent. A requested
    /// mnemonic the well does not carry yields `None` for every row.
    fn query_samples(
        &self,
        id: WellId,
        mnemonics: &[String],
        depth_min: Option<f64>,
        depth_max: Option<f64>,
    ) -> Result<Vec<SampleRow>, StoreError>;

    /// Delete a well and everything it owns. Returns false when unknown.
    fn delete_well(&self, id: WellId) -> Result<bool, StoreError>;
}

/// Order-preserving encoding of an f64 depth: byte-wise comparison of the
/// result matches numeric comparison of the input (negative depths included).
pub(crate) fn depth_ordinal(depth: f64) -> u64 {
    let bits = depth.to_bits();
    if bits & (1 << 63) != 0 {
        !bits
    } else {
        bits | (1 << 63)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_ordinal_preserves_order() {
        let depths = [-250.5, -1.0, 0.0, 0.25, 8665.0, 9300.75, f64::INFINITY];
        for pair in depths.windows(2) {
            assert!(depth_ordinal(pair[0]) < depth_ordinal(pair[1]));
        }
    }
}
