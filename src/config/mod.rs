use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Timeout for bulk endpoints and explicit login
    pub request_timeout_ms: u64,
    /// Timeout for the silent re-authentication probe
    pub reauth_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Keep the raw password so the next start can re-authenticate silently
    pub persist_password: bool,
    /// Also drop email/password on logout, not just token/user/role
    pub logout_clears_credentials: bool,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn reauth_timeout(&self) -> Duration {
        Duration::from_millis(self.reauth_timeout_ms)
    }
}

impl StorageConfig {
    /// Directory holding `credentials.json`
    pub fn resolve_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.config_dir {
            return Ok(dir.clone());
        }
        let home = env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        Ok(PathBuf::from(home).join(".config").join("hrms"))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist_password: true,
            logout_clears_credentials: false,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("HRMS_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    /// Config pointing at an explicit server, used by tests and embedders
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.api.base_url = base_url.into();
        config
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("HRMS_BASE_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("HRMS_REQUEST_TIMEOUT_MS") {
            self.api.request_timeout_ms = parse_override("HRMS_REQUEST_TIMEOUT_MS", &v, self.api.request_timeout_ms);
        }
        if let Ok(v) = env::var("HRMS_REAUTH_TIMEOUT_MS") {
            self.api.reauth_timeout_ms = parse_override("HRMS_REAUTH_TIMEOUT_MS", &v, self.api.reauth_timeout_ms);
        }

        if let Ok(v) = env::var("HRMS_CONFIG_DIR") {
            self.storage.config_dir = Some(PathBuf::from(v));
        }

        if let Ok(v) = env::var("HRMS_PERSIST_PASSWORD") {
            self.session.persist_password = parse_override("HRMS_PERSIST_PASSWORD", &v, self.session.persist_password);
        }
        if let Ok(v) = env::var("HRMS_LOGOUT_CLEARS_CREDENTIALS") {
            self.session.logout_clears_credentials =
                parse_override("HRMS_LOGOUT_CLEARS_CREDENTIALS", &v, self.session.logout_clears_credentials);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8000/api".to_string(),
                request_timeout_ms: 10_000,
                reauth_timeout_ms: 5_000,
            },
            storage: StorageConfig { config_dir: None },
            session: SessionConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.hrms.example.com/api".to_string(),
                request_timeout_ms: 10_000,
                reauth_timeout_ms: 5_000,
            },
            storage: StorageConfig { config_dir: None },
            session: SessionConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://hrms.example.com/api".to_string(),
                request_timeout_ms: 10_000,
                reauth_timeout_ms: 5_000,
            },
            storage: StorageConfig { config_dir: None },
            session: SessionConfig {
                persist_password: true,
                logout_clears_credentials: true,
            },
        }
    }
}

/// Parsed value of an override variable, or `fallback` with a warning
fn parse_override<T>(name: &str, raw: &str, fallback: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(variable = name, value = raw, "Ignoring malformed override, keeping {}", fallback);
            fallback
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<ClientConfig> = Lazy::new(ClientConfig::from_env);

pub fn config() -> &'static ClientConfig {
    &CONFIG
}
