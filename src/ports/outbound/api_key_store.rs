use crate::shared::Result;

/// ApiKeyStore port for persisting the NVD API key across restarts
pub trait ApiKeyStore: Send + Sync {
    /// Writes the key, replacing any previously stored one
    fn persist(&self, api_key: &str) -> Result<()>;

    /// Reads the stored key; `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<String>>;
}
