use crate::sbom_catalog::domain::{InsertSbom, Sbom, SbomId, SbomPatch};

/// SbomRepository port owning the canonical copy of every SBOM
///
/// Absence is reported as `None`/`false`, never as an error. Implementations must make each
/// operation atomic with respect to concurrent mutations of the same id and must be
/// `Send + Sync` so one instance can be shared across request handlers.
pub trait SbomRepository: Send + Sync {
    /// Stores a new record under the next id; ids start at 1 and are never reused
    fn create(&self, insert: InsertSbom) -> Sbom;

    fn get(&self, id: SbomId) -> Option<Sbom>;

    /// All records in insertion order
    fn list(&self) -> Vec<Sbom>;

    /// Replaces the fields present in `patch`; `None` when the id is unknown
    fn update(&self, id: SbomId, patch: SbomPatch) -> Option<Sbom>;

    /// Returns whether a record was removed
    fn delete(&self, id: SbomId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
