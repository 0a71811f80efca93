//! Sled-backed well store.
//!
//! Tree layout:
//! - `wells`:   well id (u64 BE) -> JSON `WellRecord`
//! - `names`:   well name bytes  -> well id (u64 BE)
//! - `curves`:  well id (u64 BE) -> JSON `Vec<CurveDefinition>`
//! - `samples`: well id (u64 BE) ++ depth ordinal (u64 BE) ++ row ordinal
//!   (u32 BE) -> JSON `StoredSample`
//!
//! The composite sample key sorts by (well, depth, row), so a sled range scan
//! returns rows in ascending depth order regardless of insertion order. The
//! row ordinal keeps rows that share a depth distinct, in file order.

use super::{depth_ordinal, StoreError, WellStore};
use crate::types::{CurveDefinition, ParsedLas, SampleRow, WellId, WellRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

const TREE_WELLS: &str = "wells";
const TREE_NAMES: &str = "names";
const TREE_CURVES: &str = "curves";
const TREE_SAMPLES: &str = "samples";

#[derive(Serialize, Deserialize)]
struct StoredSample {
    depth: f64,
    values: HashMap<String, Option<f64>>,
}

/// Durable well store on a local sled database.
#[derive(Clone)]
pub struct SledWellStore {
    db: Arc<sled::Db>,
    wells: sled::Tree,
    names: sled::Tree,
    curves: sled::Tree,
    samples: sled::Tree,
}

impl SledWellStore {
    /// Open or create the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self {
            wells: db.open_tree(TREE_WELLS)?,
            names: db.open_tree(TREE_NAMES)?,
            curves: db.open_tree(TREE_CURVES)?,
            samples: db.open_tree(TREE_SAMPLES)?,
            db: Arc::new(db),
        })
    }

    fn sample_key(id: WellId, depth: f64, row: u32) -> [u8; 20] {
        let mut key = [0u8; 20];
        key[..8].copy_from_slice(&id.0.to_be_bytes());
        key[8..16].copy_from_slice(&depth_ordinal(depth).to_be_bytes());
        key[16..].copy_from_slice(&row.to_be_bytes());
        key
    }

    /// Remove every record owned by a well id (the name pointer is handled
    /// by the caller).
    fn sweep_well(&self, id: WellId) -> Result<(), StoreError> {
        self.wells.remove(id.0.to_be_bytes())?;
        self.curves.remove(id.0.to_be_bytes())?;

        let low = Self::sample_key(id, f64::NEG_INFINITY, u32::MIN);
        let high = Self::sample_key(id, f64::INFINITY, u32::MAX);
        let keys: Vec<_> = self
            .samples
            .range(low..=high)
            .filter_map(|item| item.ok().map(|(k, _)| k))
            .collect();
        for key in keys {
            self.samples.remove(key)?;
        }
        Ok(())
    }

    fn decode_record(bytes: &[u8]) -> Result<WellRecord, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl WellStore for SledWellStore {
    fn put_well(
        &self,
        parsed: &ParsedLas,
        source_file: Option<&str>,
    ) -> Result<WellId, StoreError> {
        let id = WellId(self.db.generate_id()?);

        self.curves
            .insert(id.0.to_be_bytes(), serde_json::to_vec(&parsed.curves)?)?;
        for (row, sample) in parsed.samples.iter().enumerate() {
            let stored = StoredSample {
                depth: sample.depth,
                values: sample.values.clone(),
            };
            self.samples.insert(
                Self::sample_key(id, sample.depth, row as u32),
                serde_json::to_vec(&stored)?,
            )?;
        }

        let record = WellRecord {
            id,
            info: parsed.info.clone(),
            uploaded_at: Utc::now(),
            source_file: source_file.map(str::to_string),
            curve_count: parsed.curves.len(),
            sample_count: parsed.samples.len(),
        };
        self.wells
            .insert(id.0.to_be_bytes(), serde_json::to_vec(&record)?)?;

        // Swap the name pointer last, then sweep the displaced well. Readers
        // resolving by name see either the old well or the new one, complete.
        let prior = self
            .names
            .insert(parsed.info.well_name.as_bytes(), &id.0.to_be_bytes())?;
        if let Some(prior) = prior {
            let mut old = [0u8; 8];
            old.copy_from_slice(&prior);
            let old_id = WellId(u64::from_be_bytes(old));
            if old_id != id {
                tracing::info!(
                    well = %parsed.info.well_name,
                    old_id = %old_id,
                    new_id = %id,
                    "Replacing existing well"
                );
                self.sweep_well(old_id)?;
            }
        }
        self.db.flush()?;

        tracing::info!(
            well = %parsed.info.well_name,
            id = %id,
            curves = parsed.curves.len(),
            rows = parsed.samples.len(),
            "Stored well"
        );
        Ok(id)
    }

    fn get_well(&self, id: WellId) -> Result<Option<WellRecord>, StoreError> {
        match self.wells.get(id.0.to_be_bytes())? {
            Some(bytes) => Ok(Some(Self::decode_record(&bytes)?)),
            None => Ok(None),
        }
    }

    fn find_by_name(&self, name: &str) -> Result<Option<WellRecord>, StoreError> {
        match self.names.get(name.as_bytes())? {
            Some(idb) => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&idb);
                self.get_well(WellId(u64::from_be_bytes(raw)))
            }
            None => Ok(None),
        }
    }

    fn list_wells(&self) -> Result<Vec<WellRecord>, StoreError> {
        let mut records = Vec::new();
        for item in self.wells.iter() {
            let (_, bytes) = item?;
            records.push(Self::decode_record(&bytes)?);
        }
        records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(records)
    }

    fn curves(&self, id: WellId) -> Result<Vec<CurveDefinition>, StoreError> {
        match self.curves.get(id.0.to_be_bytes())? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    fn query_samples(
        &self,
        id: WellId,
        mnemonics: &[String],
        depth_min: Option<f64>,
        depth_max: Option<f64>,
    ) -> Result<Vec<SampleRow>, StoreError> {
        let low = Self::sample_key(id, depth_min.unwrap_or(f64::NEG_INFINITY), u32::MIN);
        let high = Self::sample_key(id, depth_max.unwrap_or(f64::INFINITY), u32::MAX);

        let mut rows = Vec::new();
        for item in self.samples.range(low..=high) {
            let (_, bytes) = item?;
            let stored: StoredSample = serde_json::from_slice(&bytes)?;
            let values = mnemonics
                .iter()
                .map(|m| (m.clone(), stored.values.get(m).copied().flatten()))
                .collect();
            rows.push(SampleRow {
                depth: stored.depth,
                values,
            });
        }
        Ok(rows)
    }

    fn delete_well(&self, id: WellId) -> Result<bool, StoreError> {
        let Some(record) = self.get_well(id)? else {
            return Ok(false);
        };
        // Drop the name pointer only if it still points at this id.
        if let Some(current) = self.names.get(record.info.well_name.as_bytes())? {
            if current.as_ref() == id.0.to_be_bytes() {
                self.names.remove(record.info.well_name.as_bytes())?;
            }
        }
        self.sweep_well(id)?;
        self.db.flush()?;
        tracing::info!(well = %record.info.well_name, id = %id, "Deleted well");
        Ok(true)
    }
}
