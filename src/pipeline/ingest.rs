//! LAS file ingestion: validate, parse, store.

use crate::ingest::{parse_las, LasError};
use crate::storage::{StoreError, WellStore};
use crate::types::WellRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported file type: {0} (expected .las)")]
    UnsupportedExtension(String),

    #[error("file too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("LAS parse error: {0}")]
    Parse(#[from] LasError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What an ingestion produced.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub well: WellRecord,
    /// Whether a prior well of the same name was replaced.
    pub replaced: bool,
}

/// Validate, parse, and store one uploaded LAS file.
///
/// Re-ingesting a file whose well name already exists replaces the prior
/// well entirely; the report says so.
pub fn ingest_bytes(
    store: &dyn WellStore,
    file_name: &str,
    bytes: &[u8],
    max_file_bytes: u64,
) -> Result<IngestReport, IngestError> {
    if !file_name.to_lowercase().ends_with(".las") {
        return Err(IngestError::UnsupportedExtension(file_name.to_string()));
    }
    let size = bytes.len() as u64;
    if size > max_file_bytes {
        return Err(IngestError::TooLarge {
            size,
            limit: max_file_bytes,
        });
    }

    let parsed = parse_las(bytes)?;
    let replaced = store.find_by_name(&parsed.info.well_name)?.is_some();
    let id = store.put_well(&parsed, Some(file_name))?;
    let well = store
        .get_well(id)?
        .ok_or_else(|| StoreError::Database("stored well missing after put".to_string()))?;

    tracing::info!(
        well = %well.info.well_name,
        id = %id,
        curves = well.curve_count,
        samples = well.sample_count,
        replaced,
        "ingested LAS file"
    );
    Ok(IngestReport { well, replaced })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryWellStore;

    const MINIMAL_LAS: &str = "\
~Version
 VERS.   2.0 : CWLS log ASCII Standard
 WRAP.   NO  : One line per depth step
~Well
 STRT.F  8000.0000 : START DEPTH
 STOP.F  8002.0000 : STOP DEPTH
 STEP.F  1.0000    : STEP
 NULL.   -999.25   : NULL VALUE
 WELL.   TEST WELL : WELL NAME
~Curve
 DEPT.F      : Depth
 HC1.PPM     : Methane
~ASCII
 8000.0000  12.5000
 8001.0000  14.0000
 8002.0000  -999.25
";

    #[test]
    fn rejects_non_las_extension() {
        let store = InMemoryWellStore::new();
        let err = ingest_bytes(&store, "well.csv", b"data", 1024).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedExtension(_)));
    }

    #[test]
    fn rejects_oversized_files() {
        let store = InMemoryWellStore::new();
        let err = ingest_bytes(&store, "big.las", &[0u8; 100], 10).unwrap_err();
        assert!(matches!(
            err,
            IngestError::TooLarge {
                size: 100,
                limit: 10
            }
        ));
    }

    #[test]
    fn ingests_and_reports_replacement() {
        let store = InMemoryWellStore::new();
        let first = ingest_bytes(&store, "a.las", MINIMAL_LAS.as_bytes(), 1 << 20).unwrap();
        assert!(!first.replaced);
        assert_eq!(first.well.info.well_name, "TEST WELL");
        assert_eq!(first.well.sample_count, 3);

        let second = ingest_bytes(&store, "b.las", MINIMAL_LAS.as_bytes(), 1 << 20).unwrap();
        assert!(second.replaced);
        assert_ne!(first.well.id, second.well.id);
        assert_eq!(store.list_wells().unwrap().len(), 1);
    }

    #[test]
    fn parse_failures_surface_as_ingest_errors() {
        let store = InMemoryWellStore::new();
        let err = ingest_bytes(&store, "empty.las", b"", 1024).unwrap_err();
        assert!(matches!(err, IngestError::Parse(_)));
    }
}
