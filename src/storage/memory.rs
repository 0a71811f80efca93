//! In-memory well store for tests and minimal deployments.
//!
//! Thread-safe via `RwLock`. Not durable — data lost on restart. Samples are
//! held in a `BTreeMap` keyed by (depth ordinal, row ordinal), so range
//! queries come back in depth order exactly like the sled backend, and rows
//! that share a depth stay distinct, in file order.

use super::{depth_ordinal, StoreError, WellStore};
use crate::types::{CurveDefinition, ParsedLas, SampleRow, WellId, WellRecord};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

struct MemWell {
    record: WellRecord,
    curves: Vec<CurveDefinition>,
    samples: BTreeMap<(u64, u32), (f64, HashMap<String, Option<f64>>)>,
}

#[derive(Default)]
struct Inner {
    wells: HashMap<u64, MemWell>,
    names: HashMap<String, u64>,
    next_id: u64,
}

/// Volatile `WellStore` implementation.
#[derive(Default)]
pub struct InMemoryWellStore {
    inner: RwLock<Inner>,
}

impl InMemoryWellStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl WellStore for InMemoryWellStore {
    fn put_well(
        &self,
        parsed: &ParsedLas,
        source_file: Option<&str>,
    ) -> Result<WellId, StoreError> {
        let mut inner = self.write()?;
        inner.next_id += 1;
        let id = WellId(inner.next_id);

        let samples = parsed
            .samples
            .iter()
            .enumerate()
            .map(|(row, s)| {
                (
                    (depth_ordinal(s.depth), row as u32),
                    (s.depth, s.values.clone()),
                )
            })
            .collect();
        let record = WellRecord {
            id,
            info: parsed.info.clone(),
            uploaded_at: Utc::now(),
            source_file: source_file.map(str::to_string),
            curve_count: parsed.curves.len(),
            sample_count: parsed.samples.len(),
        };

        inner.wells.insert(
            id.0,
            MemWell {
                record,
                curves: parsed.curves.clone(),
                samples,
            },
        );
        if let Some(old_id) = inner.names.insert(parsed.info.well_name.clone(), id.0) {
            inner.wells.remove(&old_id);
        }
        Ok(id)
    }

    fn get_well(&self, id: WellId) -> Result<Option<WellRecord>, StoreError> {
        Ok(self.read()?.wells.get(&id.0).map(|w| w.record.clone()))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<WellRecord>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .names
            .get(name)
            .and_then(|id| inner.wells.get(id))
            .map(|w| w.record.clone()))
    }

    fn list_wells(&self) -> Result<Vec<WellRecord>, StoreError> {
        let inner = self.read()?;
        let mut records: Vec<_> = inner.wells.values().map(|w| w.record.clone()).collect();
        records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(records)
    }

    fn curves(&self, id: WellId) -> Result<Vec<CurveDefinition>, StoreError> {
        Ok(self
            .read()?
            .wells
            .get(&id.0)
            .map(|w| w.curves.clone())
            .unwrap_or_default())
    }

    fn query_samples(
        &self,
        id: WellId,
        mnemonics: &[String],
        depth_min: Option<f64>,
        depth_max: Option<f64>,
    ) -> Result<Vec<SampleRow>, StoreError> {
        let inner = self.read()?;
        let Some(well) = inner.wells.get(&id.0) else {
            return Ok(Vec::new());
        };
        let low = depth_ordinal(depth_min.unwrap_or(f64::NEG_INFINITY));
        let high = depth_ordinal(depth_max.unwrap_or(f64::INFINITY));

        Ok(well
            .samples
            .range((low, u32::MIN)..=(high, u32::MAX))
            .map(|(_, (depth, values))| SampleRow {
                depth: *depth,
                values: mnemonics
                    .iter()
                    .map(|m| (m.clone(), values.get(m).copied().flatten()))
                    .collect(),
            })
            .collect())
    }

    fn delete_well(&self, id: WellId) -> Result<bool, StoreError> {
        let mut inner = self.write()?;
        let Some(well) = inner.wells.remove(&id.0) else {
            return Ok(false);
        };
        let name = well.record.info.well_name;
        if inner.names.get(&name) == Some(&id.0) {
            inner.names.remove(&name);
        }
        Ok(true)
    }
}
