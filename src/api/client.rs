use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{extract_server_message, ApiError};

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Option<Duration>,
    pub bearer: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying `Authorization: Bearer <token>`
    pub fn authorized(token: impl Into<String>) -> Self {
        Self {
            bearer: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Successful response: HTTP status and decoded JSON body
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}

/// Thin wrapper over `reqwest::Client` bound to one HRMS server
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    default_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid HRMS base URL '{}': {}", config.base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Unsupported scheme in HRMS base URL: {}", parsed.scheme());
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_timeout: config.request_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn request(&self, method: Method, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        let url = self.url(path);
        let timeout = options.timeout.unwrap_or(self.default_timeout);
        tracing::debug!(%method, %url, timeout_ms = timeout.as_millis() as u64, "HRMS request");

        let mut request = self.http.request(method.clone(), &url).timeout(timeout);
        if let Some(token) = &options.bearer {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::ClientError { status: 0, message: Some(e.to_string()) })?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::ClientError { status: 0, message: Some(e.to_string()) })?;
            request = request.header(name, value);
        }
        if !options.params.is_empty() {
            request = request.query(&options.params);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let err = ApiError::from_transport(&e);
            tracing::warn!(%method, %url, code = err.error_code(), "HRMS request failed: {}", e);
            err
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| ApiError::from_transport(&e))?;
        let parsed = if bytes.is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_slice::<Value>(&bytes)
        };

        if !(200..300).contains(&status) {
            let body = parsed.unwrap_or(Value::Null);
            let err = ApiError::from_status(status, extract_server_message(&body));
            tracing::warn!(%method, %url, status, code = err.error_code(), "HRMS request rejected");
            return Err(err);
        }

        let data = parsed.map_err(|e| ApiError::malformed(format!("response body is not JSON: {}", e)))?;
        tracing::debug!(%method, %url, status, "HRMS response");
        Ok(ApiResponse { status, data })
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.request(Method::GET, path, options).await
    }

    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.request(Method::POST, path, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::for_base_url("http://localhost:8000/api/");
        let client = ApiClient::new(&config.api).unwrap();
        assert_eq!(client.url("/employees"), "http://localhost:8000/api/employees");
        assert_eq!(client.url("employees/7"), "http://localhost:8000/api/employees/7");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = ClientConfig::for_base_url("not a url");
        assert!(ApiClient::new(&config.api).is_err());

        let config = ClientConfig::for_base_url("ftp://example.com");
        assert!(ApiClient::new(&config.api).is_err());
    }

    #[test]
    fn test_authorized_options() {
        let options = RequestOptions::authorized("abc").timeout(Duration::from_secs(5));
        assert_eq!(options.bearer.as_deref(), Some("abc"));
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    }
}
