use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::{CredentialStore, StoreError, StoreKey};

const CREDENTIALS_FILE: &str = "credentials.json";
const TEMP_SUFFIX: &str = "tmp";

/// Credential store backed by a single JSON object on disk
///
/// The whole map is rewritten on every mutation, through a temp file and a
/// rename. A missing file reads as an empty store; a corrupt one is replaced
/// by the next mutation.
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CREDENTIALS_FILE),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current map for a read-modify-write; `true` when a corrupt file was discarded
    async fn load_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StoreError> {
        match self.load().await {
            Ok(entries) => Ok((entries, false)),
            Err(StoreError::Corrupt(e)) => {
                tracing::warn!(path = %self.path.display(), "Discarding corrupt credential file: {}", e);
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let content = serde_json::to_string_pretty(entries)?;

        let temp = self.path.with_extension(TEMP_SUFFIX);
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // Holds a password: owner only
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        let entries = self.load().await?;
        Ok(entries.get(key.as_str()).cloned())
    }

    async fn set(&self, entries: &[(StoreKey, String)]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let (mut stored, _) = self.load_for_write().await?;
        for (key, value) in entries {
            stored.insert(key.as_str().to_string(), value.clone());
        }
        self.save(&stored).await
    }

    async fn remove(&self, keys: &[StoreKey]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let (mut stored, recovered) = self.load_for_write().await?;
        let before = stored.len();
        for key in keys {
            stored.remove(key.as_str());
        }
        if stored.len() == before && !recovered {
            return Ok(());
        }
        self.save(&stored).await
    }
}
