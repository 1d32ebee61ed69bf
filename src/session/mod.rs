pub mod context;
pub mod controller;

pub use context::SessionContext;
pub use controller::{LogoutDecision, LogoutOutcome, SessionController};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ApiError;
use crate::models::User;
use crate::store::StoreError;

pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const MISSING_LOGIN_FIELDS: &str = "Please enter both email and password";
pub const LOGOUT_FAILED: &str = "Failed to logout properly";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hr,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hr => "hr",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hr" => Ok(Role::Hr),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user types on the login screen
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub role: Role,
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(role: Role, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            role,
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Authenticated identity used to authorize API calls
#[derive(Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub role: Role,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"***")
            .field("user", &self.user)
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Checking,
    Authenticated(Session),
    Unauthenticated { error: Option<String> },
    LoggingOut,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Unauthenticated { error } => error.as_deref(),
            _ => None,
        }
    }
}

/// Screen the shell should show after a session transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login { error: Option<String> },
}

/// Navigation side effects of the session lifecycle
pub trait Navigator: Send + Sync {
    /// Replace the current screen, without a way back
    fn replace(&self, route: Route);
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to logout properly")]
    LogoutFailed(#[source] StoreError),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::InvalidInput(message) => message.clone(),
            SessionError::Api(ApiError::Unsuccessful { message: None }) => {
                "Login failed. Please try again.".to_string()
            }
            SessionError::Api(e) => e.user_message(),
            SessionError::Store(e) => e.to_string(),
            SessionError::LogoutFailed(_) => LOGOUT_FAILED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("hr".parse::<Role>().unwrap(), Role::Hr);
        assert_eq!(" Admin ".parse::<Role>().unwrap(), Role::Admin);
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials::new(Role::Hr, "a@x.com", "secret");
        assert!(!format!("{:?}", creds).contains("secret"));
    }
}
