use crate::application::dto::{NvdKeyRequest, NvdKeyResponse, SettingsResponse};
use crate::application::settings::NvdApiKey;
use crate::ports::outbound::{ApiKeyStore, NvdRepository};
use crate::shared::error::SbomError;
use crate::shared::security::validate_single_line;
use crate::shared::Result;
use std::sync::Arc;

/// Where the key installed at startup came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    EnvFile,
}

/// ManageSettingsUseCase - Reads and replaces the NVD API key
///
/// A new key is persisted first and only then installed, so a failed write never leaves
/// the running process with a key that would be lost on restart.
pub struct ManageSettingsUseCase {
    key_store: Arc<dyn ApiKeyStore>,
    nvd_repository: Arc<dyn NvdRepository>,
    api_key: NvdApiKey,
}

impl ManageSettingsUseCase {
    pub fn new(
        key_store: Arc<dyn ApiKeyStore>,
        nvd_repository: Arc<dyn NvdRepository>,
        api_key: NvdApiKey,
    ) -> Self {
        Self {
            key_store,
            nvd_repository,
            api_key,
        }
    }

    pub fn settings(&self) -> SettingsResponse {
        SettingsResponse {
            has_nvd_api_key: self.api_key.is_configured(),
        }
    }

    /// Installs the startup key: the process environment wins over the stored one
    pub fn load_initial_key(&self, from_environment: Option<String>) -> Result<Option<KeySource>> {
        if let Some(key) = from_environment.filter(|k| !k.trim().is_empty()) {
            self.api_key.set(key.trim().to_string());
            return Ok(Some(KeySource::Environment));
        }

        match self.key_store.load()? {
            Some(key) => {
                self.api_key.set(key);
                Ok(Some(KeySource::EnvFile))
            }
            None => Ok(None),
        }
    }

    /// Re-reads the stored key after an out-of-band edit of the store
    ///
    /// Returns whether the running key changed. A key that vanished from the store
    /// leaves the running key in place.
    pub fn reload_key(&self) -> Result<bool> {
        match self.key_store.load()? {
            Some(key) if self.api_key.get().as_deref() != Some(key.as_str()) => {
                self.api_key.set(key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub async fn update_nvd_key(&self, request: NvdKeyRequest) -> Result<NvdKeyResponse> {
        let key = request
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SbomError::validation("API key is required"))?;
        validate_single_line(key, "API key")?;

        self.key_store.persist(key)?;
        self.api_key.set(key.to_string());

        let validated = match self.nvd_repository.verify_api_key(key).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "NVD rejected or could not verify the new API key");
                false
            }
        };

        let message = if validated {
            "NVD API key updated and verified"
        } else {
            "NVD API key saved, but the verification request to NVD failed"
        };

        Ok(NvdKeyResponse {
            message: message.to_string(),
            validated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_catalog::domain::{CpeProduct, Vulnerability};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryKeyStore {
        stored: Mutex<Option<String>>,
        fail: bool,
    }

    impl ApiKeyStore for MemoryKeyStore {
        fn persist(&self, api_key: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("disk full");
            }
            *self.stored.lock().unwrap() = Some(api_key.to_string());
            Ok(())
        }

        fn load(&self) -> Result<Option<String>> {
            Ok(self.stored.lock().unwrap().clone())
        }
    }

    struct VerifyingNvd {
        accepts: bool,
    }

    #[async_trait]
    impl NvdRepository for VerifyingNvd {
        async fn search_products(&self, _: &str, _: &str) -> Result<Vec<CpeProduct>> {
            Ok(vec![])
        }

        async fn match_products(&self, _: &str, _: &str) -> Result<Vec<CpeProduct>> {
            Ok(vec![])
        }

        async fn fetch_vulnerabilities(&self, _: &str, _: &str) -> Result<Vec<Vulnerability>> {
            Ok(vec![])
        }

        async fn verify_api_key(&self, _: &str) -> Result<()> {
            if self.accepts {
                Ok(())
            } else {
                Err(SbomError::NvdRequestFailed {
                    details: "NVD API returned status code 404".to_string(),
                }
                .into())
            }
        }
    }

    fn use_case(store: Arc<MemoryKeyStore>, accepts: bool) -> (ManageSettingsUseCase, NvdApiKey) {
        let api_key = NvdApiKey::default();
        let use_case = ManageSettingsUseCase::new(
            store,
            Arc::new(VerifyingNvd { accepts }),
            api_key.clone(),
        );
        (use_case, api_key)
    }

    #[tokio::test]
    async fn test_update_persists_and_installs() {
        let store = Arc::new(MemoryKeyStore::default());
        let (use_case, api_key) = use_case(store.clone(), true);

        let response = use_case
            .update_nvd_key(NvdKeyRequest::new("  abc-123  "))
            .await
            .unwrap();

        assert!(response.validated);
        assert_eq!(api_key.get(), Some("abc-123".to_string()));
        assert_eq!(store.load().unwrap(), Some("abc-123".to_string()));
        assert!(use_case.settings().has_nvd_api_key);
    }

    #[tokio::test]
    async fn test_update_reports_failed_verification() {
        let store = Arc::new(MemoryKeyStore::default());
        let (use_case, api_key) = use_case(store, false);

        let response = use_case
            .update_nvd_key(NvdKeyRequest::new("abc"))
            .await
            .unwrap();

        assert!(!response.validated);
        assert!(api_key.is_configured());
    }

    #[tokio::test]
    async fn test_update_rejects_blank_and_multiline_keys() {
        let store = Arc::new(MemoryKeyStore::default());
        let (use_case, api_key) = use_case(store.clone(), true);

        for request in [
            NvdKeyRequest::default(),
            NvdKeyRequest::new("   "),
            NvdKeyRequest::new("abc\nDEBUG=1"),
        ] {
            let err = use_case.update_nvd_key(request).await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<SbomError>(),
                Some(SbomError::Validation { .. })
            ));
        }
        assert!(!api_key.is_configured());
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_previous_key() {
        let store = Arc::new(MemoryKeyStore {
            fail: true,
            ..Default::default()
        });
        let (use_case, api_key) = use_case(store, true);
        api_key.set("old".to_string());

        assert!(use_case
            .update_nvd_key(NvdKeyRequest::new("new"))
            .await
            .is_err());
        assert_eq!(api_key.get(), Some("old".to_string()));
    }

    #[test]
    fn test_initial_key_prefers_environment() {
        let store = Arc::new(MemoryKeyStore::default());
        store.persist("from-file").unwrap();
        let (use_case, api_key) = use_case(store, true);

        let source = use_case
            .load_initial_key(Some("from-env".to_string()))
            .unwrap();
        assert_eq!(source, Some(KeySource::Environment));
        assert_eq!(api_key.get(), Some("from-env".to_string()));
    }

    #[test]
    fn test_initial_key_falls_back_to_store() {
        let store = Arc::new(MemoryKeyStore::default());
        store.persist("from-file").unwrap();
        let (use_case, api_key) = use_case(store, true);

        let source = use_case.load_initial_key(Some(String::new())).unwrap();
        assert_eq!(source, Some(KeySource::EnvFile));
        assert_eq!(api_key.get(), Some("from-file".to_string()));
    }

    #[test]
    fn test_initial_key_absent() {
        let (use_case, api_key) = use_case(Arc::new(MemoryKeyStore::default()), true);
        assert_eq!(use_case.load_initial_key(None).unwrap(), None);
        assert!(!api_key.is_configured());
        assert!(!use_case.settings().has_nvd_api_key);
    }

    #[test]
    fn test_reload_installs_changed_key() {
        let store = Arc::new(MemoryKeyStore::default());
        let (use_case, api_key) = use_case(store.clone(), true);
        api_key.set("old".to_string());

        store.persist("edited").unwrap();
        assert!(use_case.reload_key().unwrap());
        assert_eq!(api_key.get(), Some("edited".to_string()));

        assert!(!use_case.reload_key().unwrap());
    }

    #[test]
    fn test_reload_keeps_key_when_store_is_empty() {
        let (use_case, api_key) = use_case(Arc::new(MemoryKeyStore::default()), true);
        api_key.set("running".to_string());

        assert!(!use_case.reload_key().unwrap());
        assert_eq!(api_key.get(), Some("running".to_string()));
    }

    #[test]
    fn test_reload_surfaces_store_errors() {
        struct BrokenStore;

        impl ApiKeyStore for BrokenStore {
            fn persist(&self, _: &str) -> Result<()> {
                Ok(())
            }

            fn load(&self) -> Result<Option<String>> {
                anyhow::bail!("unreadable")
            }
        }

        let api_key = NvdApiKey::new(Some("running".to_string()));
        let use_case = ManageSettingsUseCase::new(
            Arc::new(BrokenStore),
            Arc::new(VerifyingNvd { accepts: true }),
            api_key.clone(),
        );

        assert!(use_case.reload_key().is_err());
        assert_eq!(api_key.get(), Some("running".to_string()));
    }
}
