use sbom_studio::prelude::*;
use std::sync::Mutex;

/// Mock ApiKeyStore keeping the key in memory
pub struct MockApiKeyStore {
    pub stored: Mutex<Option<String>>,
    pub should_fail: bool,
}

impl MockApiKeyStore {
    pub fn new() -> Self {
        Self {
            stored: Mutex::new(None),
            should_fail: false,
        }
    }

    pub fn with_key(key: &str) -> Self {
        Self {
            stored: Mutex::new(Some(key.to_string())),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            stored: Mutex::new(None),
            should_fail: true,
        }
    }

    pub fn stored(&self) -> Option<String> {
        self.stored.lock().unwrap().clone()
    }
}

impl Default for MockApiKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiKeyStore for MockApiKeyStore {
    fn persist(&self, api_key: &str) -> Result<()> {
        if self.should_fail {
            anyhow::bail!("Mock key store failure");
        }
        *self.stored.lock().unwrap() = Some(api_key.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        Ok(self.stored())
    }
}
