//! In-memory dataset registry.
//!
//! Uploaded CSV files are parsed once and kept in memory as immutable
//! [`Dataset`]s behind a lock; handlers clone the `Arc` out and compute
//! without holding it. Re-uploading identical content is detected via a
//! SHA-256 checksum and returns the existing dataset instead of storing a
//! duplicate.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::OccupancyRecord;
use crate::parsing::{parse_records, ParseError, RowIssue};

/// One parsed dataset, immutable after insertion.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: i64,
    pub name: String,
    /// SHA-256 of the raw CSV content, hex-encoded.
    pub checksum: String,
    pub records: Vec<OccupancyRecord>,
    /// Row-level diagnostics collected at ingestion.
    pub issues: Vec<RowIssue>,
}

/// Lightweight dataset metadata for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub dataset_id: i64,
    pub name: String,
    pub checksum: String,
    pub record_count: usize,
}

/// Result of an insert: the dataset plus whether it was newly created or
/// deduplicated against existing content.
#[derive(Debug, Clone)]
pub struct InsertOutcome {
    pub dataset: Arc<Dataset>,
    pub created: bool,
}

#[derive(Default)]
struct StoreData {
    datasets: HashMap<i64, Arc<Dataset>>,
    by_checksum: HashMap<String, i64>,
    next_id: i64,
}

/// Thread-safe in-memory store of uploaded datasets.
#[derive(Default)]
pub struct DatasetStore {
    data: RwLock<StoreData>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and store a CSV upload. Identical content (by checksum) is not
    /// stored twice; the existing dataset is returned with `created: false`.
    pub fn insert(&self, name: &str, csv_text: &str) -> Result<InsertOutcome, ParseError> {
        let checksum = calculate_checksum(csv_text);

        if let Some(existing) = self.find_by_checksum(&checksum) {
            log::info!(
                "dataset upload '{}' matches existing dataset {} by checksum",
                name,
                existing.id
            );
            return Ok(InsertOutcome { dataset: existing, created: false });
        }

        // Parse outside the lock; uploads are independent of store state.
        let parsed = parse_records(csv_text)?;

        let mut data = self.data.write();
        // Re-check under the write lock: a concurrent identical upload may
        // have won the race while we were parsing.
        if let Some(id) = data.by_checksum.get(&checksum) {
            if let Some(existing) = data.datasets.get(id) {
                return Ok(InsertOutcome { dataset: Arc::clone(existing), created: false });
            }
        }
        data.next_id += 1;
        let dataset = Arc::new(Dataset {
            id: data.next_id,
            name: name.to_string(),
            checksum: checksum.clone(),
            records: parsed.records,
            issues: parsed.issues,
        });
        data.datasets.insert(dataset.id, Arc::clone(&dataset));
        data.by_checksum.insert(checksum, dataset.id);

        Ok(InsertOutcome { dataset, created: true })
    }

    pub fn get(&self, id: i64) -> Option<Arc<Dataset>> {
        self.data.read().datasets.get(&id).cloned()
    }

    /// Dataset metadata sorted by id.
    pub fn list(&self) -> Vec<DatasetInfo> {
        let data = self.data.read();
        let mut infos: Vec<DatasetInfo> = data
            .datasets
            .values()
            .map(|d| DatasetInfo {
                dataset_id: d.id,
                name: d.name.clone(),
                checksum: d.checksum.clone(),
                record_count: d.records.len(),
            })
            .collect();
        infos.sort_by_key(|info| info.dataset_id);
        infos
    }

    pub fn len(&self) -> usize {
        self.data.read().datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find_by_checksum(&self, checksum: &str) -> Option<Arc<Dataset>> {
        let data = self.data.read();
        let id = data.by_checksum.get(checksum)?;
        data.datasets.get(id).cloned()
    }
}

/// SHA-256 checksum of raw CSV content, hex-encoded.
fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
