use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use super::{CredentialStore, StoreError, StoreKey};

/// In-process credential store, used to substitute real storage in tests
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<StoreKey, String>>,
    unavailable: AtomicBool,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = (StoreKey, String)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent operation fail as if storage were gone
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> HashMap<StoreKey, String> {
        self.entries.lock().await.clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "storage unavailable",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        self.check_available()?;
        Ok(self.entries.lock().await.get(&key).cloned())
    }

    async fn set(&self, entries: &[(StoreKey, String)]) -> Result<(), StoreError> {
        self.check_available()?;
        let mut stored = self.entries.lock().await;
        for (key, value) in entries {
            stored.insert(*key, value.clone());
        }
        Ok(())
    }

    async fn remove(&self, keys: &[StoreKey]) -> Result<(), StoreError> {
        self.check_available()?;
        let mut stored = self.entries.lock().await;
        for key in keys {
            stored.remove(key);
        }
        Ok(())
    }
}
