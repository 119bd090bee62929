use std::sync::{Arc, PoisonError, RwLock};

use svy_model::Result;
use svy_taxonomy::Taxonomy;

use crate::snapshot::{DatasetSnapshot, DatasetSource};

/// Single-slot cache holding the current dataset snapshot.
///
/// Readers share snapshots through `Arc`, so clearing or reloading never
/// pulls a dataset out from under a query that already holds one; it only
/// changes what later fetches see. The first fetch loads under the write
/// lock, so concurrent fetches of an empty cache hit the source once.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    slot: RwLock<Option<Arc<DatasetSnapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot, if any.
    pub fn get(&self) -> Option<Arc<DatasetSnapshot>> {
        // A poisoned lock still guards a coherent Option slot.
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.clone()
    }

    /// Returns the cached snapshot, loading and caching one if empty.
    pub fn get_or_load<S: DatasetSource>(
        &self,
        source: &S,
        taxonomy: &Taxonomy,
    ) -> Result<Arc<DatasetSnapshot>> {
        if let Some(snapshot) = self.get() {
            return Ok(snapshot);
        }
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        // Another fetch may have filled the slot between our read and write.
        if let Some(snapshot) = slot.as_ref() {
            return Ok(Arc::clone(snapshot));
        }
        let snapshot = Arc::new(DatasetSnapshot::build(source.load()?, taxonomy));
        *slot = Some(Arc::clone(&snapshot));
        tracing::debug!("snapshot cache filled");
        Ok(snapshot)
    }

    /// Drops the cached snapshot; the next fetch loads afresh.
    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            tracing::debug!("snapshot cache cleared");
        }
    }

    /// Loads from the source unconditionally and swaps the slot on
    /// success. On failure the previous snapshot stays in place.
    pub fn reload<S: DatasetSource>(
        &self,
        source: &S,
        taxonomy: &Taxonomy,
    ) -> Result<Arc<DatasetSnapshot>> {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        let snapshot = Arc::new(DatasetSnapshot::build(source.load()?, taxonomy));
        *slot = Some(Arc::clone(&snapshot));
        tracing::debug!("snapshot cache reloaded");
        Ok(snapshot)
    }
}
