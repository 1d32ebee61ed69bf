//! Durable key-value storage for session material.
//!
//! No encryption, no expiry: the store is an unstructured map that survives
//! restarts. Every operation is async and must be awaited before any logic
//! that depends on it runs.

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

use async_trait::async_trait;
use thiserror::Error;

/// Keys the session layer persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    UserToken,
    UserData,
    UserRole,
    Email,
    Password,
}

impl StoreKey {
    pub const ALL: [StoreKey; 5] = [
        StoreKey::UserToken,
        StoreKey::UserData,
        StoreKey::UserRole,
        StoreKey::Email,
        StoreKey::Password,
    ];

    /// Keys that make up a live session
    pub const SESSION: [StoreKey; 3] = [StoreKey::UserToken, StoreKey::UserData, StoreKey::UserRole];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::UserToken => "userToken",
            StoreKey::UserData => "userData",
            StoreKey::UserRole => "userRole",
            StoreKey::Email => "email",
            StoreKey::Password => "password",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Credential storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential storage corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError>;

    async fn set(&self, entries: &[(StoreKey, String)]) -> Result<(), StoreError>;

    async fn remove(&self, keys: &[StoreKey]) -> Result<(), StoreError>;
}
