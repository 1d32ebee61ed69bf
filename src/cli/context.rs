use std::sync::{Arc, Mutex, PoisonError};

use crate::api::{ApiClient, Resource};
use crate::config::ClientConfig;
use crate::screen::ResourceController;
use crate::session::{Navigator, Route, SessionContext, SessionController};
use crate::store::{CredentialStore, FileCredentialStore};

/// Navigator for a one-shot command: remembers where the session sent us
#[derive(Default)]
pub struct ShellNavigator {
    last: Mutex<Option<Route>>,
}

impl ShellNavigator {
    pub fn last_route(&self) -> Option<Route> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Navigator for ShellNavigator {
    fn replace(&self, route: Route) {
        tracing::debug!(?route, "Navigate");
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}

/// Everything a command needs: API client, credential store, config
pub struct ShellContext {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub store: Arc<dyn CredentialStore>,
}

impl ShellContext {
    pub fn from_config(config: ClientConfig) -> anyhow::Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let dir = config.storage.resolve_dir()?;
        tracing::debug!(dir = %dir.display(), base_url = api.base_url(), "Shell context");
        let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(dir));
        Ok(Self { config, api, store })
    }

    pub fn session(&self) -> SessionContext {
        SessionContext::new(self.store.clone())
    }

    pub fn session_controller(&self) -> SessionController<ShellNavigator> {
        SessionController::new(
            self.api.clone(),
            self.store.clone(),
            ShellNavigator::default(),
            self.config.session.clone(),
            self.config.api.request_timeout(),
            self.config.api.reauth_timeout(),
        )
    }

    pub fn controller<T>(&self, resource: Resource) -> ResourceController<T>
    where
        T: serde::de::DeserializeOwned + Clone + Send + 'static,
    {
        ResourceController::new(self.api.clone(), self.session(), resource)
    }
}
