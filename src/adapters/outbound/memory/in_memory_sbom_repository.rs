use crate::ports::outbound::SbomRepository;
use crate::sbom_catalog::domain::{InsertSbom, Sbom, SbomId, SbomPatch};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// InMemorySbomRepository adapter storing SBOMs for the lifetime of the process
///
/// Records live in a `DashMap` keyed by id; per-id operations are serialized by the map's
/// shard locks. Ids come from an atomic counter starting at 1 and are never reused, even
/// after deletion.
pub struct InMemorySbomRepository {
    sboms: DashMap<SbomId, Sbom>,
    next_id: AtomicU64,
}

impl InMemorySbomRepository {
    pub fn new() -> Self {
        Self {
            sboms: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemorySbomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomRepository for InMemorySbomRepository {
    fn create(&self, insert: InsertSbom) -> Sbom {
        let id = SbomId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let sbom = Sbom::from_insert(id, insert);
        self.sboms.insert(id, sbom.clone());
        sbom
    }

    fn get(&self, id: SbomId) -> Option<Sbom> {
        self.sboms.get(&id).map(|entry| entry.value().clone())
    }

    fn list(&self) -> Vec<Sbom> {
        let mut sboms: Vec<Sbom> = self
            .sboms
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        // Ids are assigned in insertion order
        sboms.sort_by_key(|sbom| sbom.id);
        sboms
    }

    fn update(&self, id: SbomId, patch: SbomPatch) -> Option<Sbom> {
        let mut entry = self.sboms.get_mut(&id)?;
        entry.apply_patch(patch);
        Some(entry.value().clone())
    }

    fn delete(&self, id: SbomId) -> bool {
        self.sboms.remove(&id).is_some()
    }

    fn len(&self) -> usize {
        self.sboms.len()
    }
}
