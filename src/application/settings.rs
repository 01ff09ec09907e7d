use std::sync::{Arc, RwLock};

/// Process-wide NVD API key, shared by the lookup and settings use cases
///
/// Cloning yields another handle to the same slot. Replacement is atomic: readers see either
/// the old key or the new one.
#[derive(Debug, Clone, Default)]
pub struct NvdApiKey {
    inner: Arc<RwLock<Option<String>>>,
}

impl NvdApiKey {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial.filter(|k| !k.trim().is_empty()))),
        }
    }

    /// Current key, `None` when unset
    pub fn get(&self) -> Option<String> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, key: String) {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(key);
    }

    pub fn is_configured(&self) -> bool {
        self.get().is_some()
    }
}
