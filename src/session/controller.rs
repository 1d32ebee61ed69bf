use std::sync::Arc;

use super::{
    Credentials, Navigator, Role, Route, Session, SessionContext, SessionError, SessionState, MISSING_LOGIN_FIELDS,
    SESSION_EXPIRED,
};
use crate::api::{auth, ApiClient};
use crate::config::SessionConfig;
use crate::store::{CredentialStore, StoreError, StoreKey};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutDecision {
    Cancel,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    Cancelled,
    LoggedOut,
}

/// Owns the process-wide session and drives its state machine
///
/// `Checking -> {Authenticated, Unauthenticated}`,
/// `Authenticated -> LoggingOut -> Unauthenticated`,
/// `Unauthenticated -> Authenticated`.
pub struct SessionController<N: Navigator> {
    api: ApiClient,
    store: Arc<dyn CredentialStore>,
    navigator: N,
    policy: SessionConfig,
    login_timeout: Duration,
    reauth_timeout: Duration,
    state: SessionState,
}

impl<N: Navigator> SessionController<N> {
    pub fn new(
        api: ApiClient,
        store: Arc<dyn CredentialStore>,
        navigator: N,
        policy: SessionConfig,
        login_timeout: Duration,
        reauth_timeout: Duration,
    ) -> Self {
        Self {
            api,
            store,
            navigator,
            policy,
            login_timeout,
            reauth_timeout,
            state: SessionState::Checking,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Context handed to screen controllers
    pub fn context(&self) -> SessionContext {
        SessionContext::new(self.store.clone())
    }

    /// Start-up check: replay stored credentials against `/login`
    pub async fn cold_start(&mut self) -> &SessionState {
        self.state = SessionState::Checking;

        let stored = self.stored_credentials().await;
        let Some(credentials) = stored else {
            tracing::info!("No stored credentials, showing login");
            if let Err(e) = self.store.remove(&StoreKey::ALL).await {
                tracing::warn!("Failed to clear partial credentials: {}", e);
            }
            self.enter_unauthenticated(None);
            return &self.state;
        };

        tracing::info!(role = %credentials.role, "Attempting silent re-authentication");
        match self.replay(&credentials).await {
            Ok(session) => {
                tracing::info!("Silent re-authentication succeeded");
                self.enter_authenticated(session);
            }
            Err(e) => {
                tracing::warn!("Session verification failed: {}", e);
                if let Err(store_err) = self.store.remove(&StoreKey::ALL).await {
                    tracing::warn!("Failed to purge credentials: {}", store_err);
                }
                let message = match &e {
                    SessionError::Api(api_err) => api_err.server_message().map(str::to_string),
                    _ => None,
                };
                self.enter_unauthenticated(Some(message.unwrap_or_else(|| SESSION_EXPIRED.to_string())));
            }
        }
        &self.state
    }

    /// Restore a complete stored session without contacting the server
    pub async fn resume(&mut self) -> &SessionState {
        self.state = match self.context().current_session().await {
            Some(session) => SessionState::Authenticated(session),
            None => SessionState::Unauthenticated { error: None },
        };
        &self.state
    }

    /// Explicit login from the login screen
    ///
    /// On failure stored credentials are left untouched.
    pub async fn login(&mut self, credentials: Credentials) -> Result<Session, SessionError> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            let err = SessionError::InvalidInput(MISSING_LOGIN_FIELDS.to_string());
            self.state = SessionState::Unauthenticated { error: Some(err.user_message()) };
            return Err(err);
        }

        tracing::info!(role = %credentials.role, email = %credentials.email, "Logging in");
        let result = self.authenticate(&credentials, self.login_timeout, true).await;
        match result {
            Ok(session) => {
                self.enter_authenticated(session.clone());
                Ok(session)
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.state = SessionState::Unauthenticated { error: Some(e.user_message()) };
                Err(e)
            }
        }
    }

    /// Confirmed logout; cancelling leaves everything as it was
    pub async fn logout(&mut self, decision: LogoutDecision) -> Result<LogoutOutcome, SessionError> {
        if decision == LogoutDecision::Cancel {
            return Ok(LogoutOutcome::Cancelled);
        }

        let previous = std::mem::replace(&mut self.state, SessionState::LoggingOut);
        let keys: &[StoreKey] = if self.policy.logout_clears_credentials {
            &StoreKey::ALL
        } else {
            &StoreKey::SESSION
        };

        if let Err(e) = self.store.remove(keys).await {
            tracing::warn!("Logout error: {}", e);
            self.state = previous;
            return Err(SessionError::LogoutFailed(e));
        }

        tracing::info!("Logged out");
        self.enter_unauthenticated(None);
        Ok(LogoutOutcome::LoggedOut)
    }

    async fn stored_credentials(&self) -> Option<Credentials> {
        let context = self.context();
        let email = context.read(StoreKey::Email).await?;
        let password = context.read(StoreKey::Password).await?;
        let role = context.read(StoreKey::UserRole).await?.parse::<Role>().ok()?;
        Some(Credentials { role, email, password })
    }

    async fn replay(&self, credentials: &Credentials) -> Result<Session, SessionError> {
        self.authenticate(credentials, self.reauth_timeout, false).await
    }

    /// Call `/login` and persist the grant; the token is overwritten either way
    async fn authenticate(
        &self,
        credentials: &Credentials,
        timeout: Duration,
        explicit: bool,
    ) -> Result<Session, SessionError> {
        let grant = auth::login(&self.api, credentials, timeout).await?;

        // Replay prefers the role the server reports for the user
        let role = if explicit {
            credentials.role
        } else {
            grant
                .user
                .role
                .as_deref()
                .and_then(|r| r.parse::<Role>().ok())
                .unwrap_or(credentials.role)
        };

        let mut entries = vec![
            (StoreKey::UserToken, grant.token.clone()),
            (StoreKey::UserData, serde_json::to_string(&grant.raw_user).map_err(StoreError::from)?),
            (StoreKey::UserRole, role.as_str().to_string()),
            (StoreKey::Email, credentials.email.clone()),
        ];
        if explicit && self.policy.persist_password {
            entries.push((StoreKey::Password, credentials.password.clone()));
        }
        self.store.set(&entries).await?;
        if explicit && !self.policy.persist_password {
            self.store.remove(&[StoreKey::Password]).await?;
        }

        Ok(Session {
            token: grant.token,
            user: grant.user,
            role,
        })
    }

    fn enter_authenticated(&mut self, session: Session) {
        self.state = SessionState::Authenticated(session);
        self.navigator.replace(Route::Landing);
    }

    fn enter_unauthenticated(&mut self, error: Option<String>) {
        self.state = SessionState::Unauthenticated { error: error.clone() };
        self.navigator.replace(Route::Login { error });
    }
}
