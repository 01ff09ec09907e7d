use crate::ports::outbound::SbomRepository;
use crate::sbom_catalog::domain::{Sbom, SbomId};
use crate::sbom_catalog::services::SbomValidator;
use crate::shared::error::SbomError;
use crate::shared::Result;
use serde_json::Value;
use std::sync::Arc;

/// ManageSbomsUseCase - CRUD over stored SBOMs
///
/// Payloads arrive as raw JSON and are validated before they reach the repository.
/// Unknown ids surface as `SbomError::SbomNotFound`.
pub struct ManageSbomsUseCase {
    repository: Arc<dyn SbomRepository>,
}

impl ManageSbomsUseCase {
    pub fn new(repository: Arc<dyn SbomRepository>) -> Self {
        Self { repository }
    }

    /// Parses a path segment into an id; anything that is not an id cannot name a record
    pub fn parse_id(raw: &str) -> Result<SbomId> {
        raw.parse::<SbomId>().map_err(|_| {
            SbomError::SbomNotFound {
                id: raw.to_string(),
            }
            .into()
        })
    }

    pub fn list(&self) -> Vec<Sbom> {
        self.repository.list()
    }

    pub fn get(&self, id: SbomId) -> Result<Sbom> {
        self.repository.get(id).ok_or_else(|| not_found(id))
    }

    pub fn create(&self, payload: &Value) -> Result<Sbom> {
        let insert = SbomValidator::validate_insert(payload)?;
        let sbom = self.repository.create(insert);
        tracing::info!(id = %sbom.id, name = %sbom.name, "created SBOM");
        Ok(sbom)
    }

    /// Validates first, so a malformed payload is reported even for an unknown id
    pub fn update(&self, id: SbomId, payload: &Value) -> Result<Sbom> {
        let patch = SbomValidator::validate_partial_update(payload)?;
        let sbom = self.repository.update(id, patch).ok_or_else(|| not_found(id))?;
        tracing::info!(id = %sbom.id, "updated SBOM");
        Ok(sbom)
    }

    pub fn delete(&self, id: SbomId) -> Result<()> {
        if !self.repository.delete(id) {
            return Err(not_found(id));
        }
        tracing::info!(id = %id, "deleted SBOM");
        Ok(())
    }
}

fn not_found(id: SbomId) -> anyhow::Error {
    SbomError::SbomNotFound { id: id.to_string() }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::InMemorySbomRepository;
    use serde_json::json;

    fn use_case() -> ManageSbomsUseCase {
        ManageSbomsUseCase::new(Arc::new(InMemorySbomRepository::new()))
    }

    fn payload() -> Value {
        json!({
            "name": "demo",
            "version": "1.0",
            "format": "CycloneDX",
            "components": [{"name": "libfoo", "version": "1.2", "type": "library"}],
            "metadata": {"timestamp": "2024-01-01T00:00:00Z", "tools": [], "authors": []}
        })
    }

    fn is_not_found(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<SbomError>(),
            Some(SbomError::SbomNotFound { .. })
        )
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(ManageSbomsUseCase::parse_id("3").unwrap(), SbomId::new(3));
        assert!(is_not_found(&ManageSbomsUseCase::parse_id("abc").unwrap_err()));
    }

    #[test]
    fn test_create_and_get() {
        let use_case = use_case();
        let created = use_case.create(&payload()).unwrap();
        assert_eq!(created.id, SbomId::new(1));
        assert_eq!(use_case.get(created.id).unwrap(), created);
        assert_eq!(use_case.list().len(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_payload() {
        let use_case = use_case();
        let mut body = payload();
        body["name"] = json!("");

        let err = use_case.create(&body).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SbomError>(),
            Some(SbomError::Validation { .. })
        ));
        assert!(use_case.list().is_empty());
    }

    #[test]
    fn test_update_unknown_id() {
        let err = use_case()
            .update(SbomId::new(5), &json!({"version": "2.0"}))
            .unwrap_err();
        assert!(is_not_found(&err));
    }

    #[test]
    fn test_update_validates_before_lookup() {
        let err = use_case()
            .update(SbomId::new(5), &json!({"version": ""}))
            .unwrap_err();
        assert!(!is_not_found(&err));
    }

    #[test]
    fn test_delete() {
        let use_case = use_case();
        let created = use_case.create(&payload()).unwrap();

        assert!(use_case.delete(created.id).is_ok());
        assert!(is_not_found(&use_case.delete(created.id).unwrap_err()));
        assert!(is_not_found(&use_case.get(created.id).unwrap_err()));
    }
}
