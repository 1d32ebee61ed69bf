use std::sync::Arc;

use super::{Role, Session};
use crate::error::ApiError;
use crate::models::User;
use crate::store::{CredentialStore, StoreKey};

/// Read-side handle on the session, passed explicitly to screen controllers
///
/// Reads always go to the credential store, so a logout elsewhere is seen by
/// the next request.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn CredentialStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Token for the `Authorization` header
    ///
    /// Only a complete session authorizes requests; a partial or unreadable
    /// one means no request is sent.
    pub async fn bearer_token(&self) -> Result<String, ApiError> {
        match self.current_session().await {
            Some(session) => Ok(session.token),
            None => Err(ApiError::credential_missing("No complete session found")),
        }
    }

    /// Complete stored session, or `None` when any part is missing
    pub async fn current_session(&self) -> Option<Session> {
        let token = self.read(StoreKey::UserToken).await?;
        let role = self.read(StoreKey::UserRole).await?.parse::<Role>().ok()?;
        let raw_user = self.read(StoreKey::UserData).await?;
        let user = match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Stored user data is unreadable: {}", e);
                return None;
            }
        };

        Some(Session { token, user, role })
    }

    pub(crate) async fn read(&self, key: StoreKey) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!(key = %key, "Credential store unreadable: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCredentialStore;

    fn context(entries: Vec<(StoreKey, &str)>) -> (Arc<MemoryCredentialStore>, SessionContext) {
        let store = Arc::new(MemoryCredentialStore::with_entries(
            entries.into_iter().map(|(k, v)| (k, v.to_string())),
        ));
        (store.clone(), SessionContext::new(store))
    }

    #[tokio::test]
    async fn test_partial_session_is_unauthenticated() {
        let (_, ctx) = context(vec![(StoreKey::UserToken, "abc"), (StoreKey::UserRole, "hr")]);
        assert!(ctx.current_session().await.is_none());
        assert!(matches!(ctx.bearer_token().await, Err(ApiError::CredentialMissing(_))));
    }

    #[tokio::test]
    async fn test_complete_session() {
        let (_, ctx) = context(vec![
            (StoreKey::UserToken, "abc"),
            (StoreKey::UserRole, "admin"),
            (StoreKey::UserData, r#"{"id":1,"name":"A"}"#),
        ]);
        let session = ctx.current_session().await.unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.user.name.as_deref(), Some("A"));
        assert_eq!(ctx.bearer_token().await.unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_unavailable_store_means_no_token() {
        let (store, ctx) = context(vec![(StoreKey::UserToken, "abc")]);
        store.set_unavailable(true);
        assert!(matches!(ctx.bearer_token().await, Err(ApiError::CredentialMissing(_))));
        assert!(ctx.current_session().await.is_none());
    }
}
