// Client Error Types
use serde_json::{json, Value};
use thiserror::Error;

/// Classified failure of a call against the HRMS API
///
/// The classification decides which message the user sees. It never decides
/// whether a call is retried: retries are always user-initiated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    // No bearer token available, request never sent
    #[error("Credential missing: {0}")]
    CredentialMissing(String),

    // No response received
    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("Request timed out")]
    Timeout,

    // 401 / 403
    #[error("Authentication rejected ({status})")]
    AuthRejected { status: u16, message: Option<String> },

    // 400 / 404 / other 4xx
    #[error("Client error ({status})")]
    ClientError { status: u16, message: Option<String> },

    // 5xx
    #[error("Server error ({status})")]
    ServerError { status: u16, message: Option<String> },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // HTTP 200 without `success: true`
    #[error("Request was not successful")]
    Unsuccessful { message: Option<String> },

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Build the error for a non-2xx response
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 | 403 => ApiError::AuthRejected { status, message },
            500..=599 => ApiError::ServerError { status, message },
            _ => ApiError::ClientError { status, message },
        }
    }

    /// Classify a transport-level reqwest failure
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::MalformedResponse(err.to_string())
        } else {
            ApiError::NetworkUnreachable(err.to_string())
        }
    }

    pub fn credential_missing(message: impl Into<String>) -> Self {
        ApiError::CredentialMissing(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ApiError::MalformedResponse(message.into())
    }

    /// HTTP status, when a response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::AuthRejected { status, .. }
            | ApiError::ClientError { status, .. }
            | ApiError::ServerError { status, .. } => Some(*status),
            ApiError::Unsuccessful { .. } => Some(200),
            _ => None,
        }
    }

    /// Message supplied by the server in the response body, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::AuthRejected { message, .. }
            | ApiError::ClientError { message, .. }
            | ApiError::ServerError { message, .. }
            | ApiError::Unsuccessful { message } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Get error code for output and logging
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::CredentialMissing(_) => "CREDENTIAL_MISSING",
            ApiError::NetworkUnreachable(_) => "NETWORK_UNREACHABLE",
            ApiError::Timeout => "TIMEOUT",
            ApiError::AuthRejected { .. } => "AUTH_REJECTED",
            ApiError::ClientError { .. } => "CLIENT_ERROR",
            ApiError::ServerError { .. } => "SERVER_ERROR",
            ApiError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            ApiError::Unsuccessful { .. } => "UNSUCCESSFUL",
            ApiError::Cancelled => "CANCELLED",
        }
    }

    /// Single user-facing message for this failure
    ///
    /// A message from the server body wins over the generic text.
    pub fn user_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }

        let generic = match self {
            ApiError::CredentialMissing(_) => "Failed to get authentication token",
            ApiError::NetworkUnreachable(_) => "Network error. Please check your internet connection.",
            ApiError::Timeout => "Request timed out. Please try again.",
            ApiError::AuthRejected { status: 403, .. } => "Access denied. Please contact support.",
            ApiError::AuthRejected { .. } => "Invalid credentials. Please try again.",
            ApiError::ClientError { status: 400, .. } => "Invalid request. Please check your inputs.",
            ApiError::ClientError { status: 404, .. } => "Resource not found. Please try again later.",
            ApiError::ClientError { .. } => "An unexpected error occurred.",
            ApiError::ServerError { .. } => "Server error. Please try again later.",
            ApiError::MalformedResponse(_) => "Unexpected response from server.",
            ApiError::Unsuccessful { .. } => "Request failed. Please try again.",
            ApiError::Cancelled => "Request cancelled.",
        };
        generic.to_string()
    }

    /// Message a list/detail screen shows when fetching `label` failed
    pub fn screen_message(&self, label: &str) -> String {
        match self {
            ApiError::Unsuccessful { message: None } => format!("Failed to fetch {}", label),
            _ => self.user_message(),
        }
    }

    /// Convert to JSON output body
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "success": false,
            "error": self.user_message(),
            "error_code": self.error_code()
        });

        if let Some(status) = self.status_code() {
            body["status"] = json!(status);
        }

        body
    }
}

/// Pull a human-readable message out of an error response body
pub fn extract_server_message(body: &Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
