//! In-process stand-in for the HRMS backend.
//!
//! Each test spawns its own server on a free port and scripts the replies it
//! needs; every request is recorded so tests can assert on what was sent.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};

use hrms_client::api::ApiClient;
use hrms_client::config::ClientConfig;
use hrms_client::screen::ResourceController;
use hrms_client::session::{Navigator, Route, SessionContext, SessionController};
use hrms_client::store::{CredentialStore, MemoryCredentialStore, StoreKey};

pub const TOKEN: &str = "token-abc";

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
    pub delay: Duration,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as the backend saw it
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

struct Rule {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    replies: VecDeque<Reply>,
    last: Reply,
}

impl Rule {
    fn matches(&self, method: &Method, path: &str, query: &HashMap<String, String>) -> bool {
        self.method == method
            && self.path == path
            && self.query.iter().all(|(k, v)| query.get(k) == Some(v))
    }

    fn next_reply(&mut self) -> Reply {
        match self.replies.pop_front() {
            Some(reply) => {
                self.last = reply.clone();
                reply
            }
            None => self.last.clone(),
        }
    }
}

#[derive(Default)]
struct Script {
    rules: Vec<Rule>,
    hits: Vec<Hit>,
}

#[derive(Clone)]
pub struct MockBackend {
    pub base_url: String,
    script: Arc<Mutex<Script>>,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let script = Arc::new(Mutex::new(Script::default()));

        let app = Router::new().fallback(dispatch).with_state(script.clone());
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock backend")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}/api", port),
            script,
        })
    }

    /// Script replies for `method path`; later calls repeat the last reply
    pub fn on(&self, method: Method, path: &str, replies: Vec<Reply>) -> &Self {
        self.on_query(method, path, &[], replies)
    }

    /// Like `on`, only for requests carrying all of `query`
    pub fn on_query(&self, method: Method, path: &str, query: &[(&str, &str)], replies: Vec<Reply>) -> &Self {
        let mut replies: VecDeque<Reply> = replies.into();
        let last = replies
            .back()
            .cloned()
            .unwrap_or_else(|| Reply::status(500, json!({ "message": "no reply scripted" })));
        if replies.is_empty() {
            replies.push_back(last.clone());
        }

        let mut script = self.script.lock().unwrap();
        // Most specific rule first
        let rule = Rule {
            method,
            path: path.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            replies,
            last,
        };
        let at = script
            .rules
            .iter()
            .position(|r| r.query.len() < rule.query.len())
            .unwrap_or(script.rules.len());
        script.rules.insert(at, rule);
        self
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.script.lock().unwrap().hits.clone()
    }

    pub fn hits_to(&self, path: &str) -> Vec<Hit> {
        self.hits().into_iter().filter(|h| h.path == path).collect()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::for_base_url(self.base_url.clone())
    }

    pub fn api(&self) -> ApiClient {
        api_for(&self.config())
    }
}

async fn dispatch(
    State(script): State<Arc<Mutex<Script>>>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();
    let hit = Hit {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };

    let reply = {
        let mut script = script.lock().unwrap();
        script.hits.push(hit);
        script
            .rules
            .iter_mut()
            .find(|r| r.matches(&method, &path, &query))
            .map(Rule::next_reply)
    };

    let Some(reply) = reply else {
        return (StatusCode::NOT_FOUND, axum::Json(json!({ "message": "Route not found" }))).into_response();
    };

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, axum::Json(reply.body)).into_response()
}

/// Navigator that records every route it was asked to show
#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn last(&self) -> Option<Route> {
        self.routes.lock().unwrap().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub fn login_success(token: &str, role: &str) -> Value {
    json!({
        "success": true,
        "token": token,
        "user": { "id": 7, "name": "Priya Nair", "email": "priya@example.com", "role": role }
    })
}

/// Store holding a complete session plus replayable credentials
pub fn signed_in_store() -> Arc<MemoryCredentialStore> {
    Arc::new(MemoryCredentialStore::with_entries([
        (StoreKey::UserToken, TOKEN.to_string()),
        (
            StoreKey::UserData,
            json!({ "id": 7, "name": "Priya Nair", "role": "hr" }).to_string(),
        ),
        (StoreKey::UserRole, "hr".to_string()),
        (StoreKey::Email, "priya@example.com".to_string()),
        (StoreKey::Password, "secret".to_string()),
    ]))
}

pub fn session_controller(
    backend: &MockBackend,
    store: Arc<dyn CredentialStore>,
) -> SessionController<RecordingNavigator> {
    session_controller_with_config(&backend.config(), store)
}

pub fn session_controller_with_config(
    config: &ClientConfig,
    store: Arc<dyn CredentialStore>,
) -> SessionController<RecordingNavigator> {
    SessionController::new(
        api_for(config),
        store,
        RecordingNavigator::default(),
        config.session.clone(),
        config.api.request_timeout(),
        config.api.reauth_timeout(),
    )
}

pub fn api_for(config: &ClientConfig) -> ApiClient {
    ApiClient::new(&config.api).expect("test base url is valid")
}

pub fn resource_controller<T>(
    backend: &MockBackend,
    store: Arc<dyn CredentialStore>,
    resource: hrms_client::api::Resource,
) -> ResourceController<T>
where
    T: serde::de::DeserializeOwned + Clone + Send + 'static,
{
    ResourceController::new(backend.api(), SessionContext::new(store), resource)
}

/// Base URL on a port nothing listens on
pub fn closed_port_config() -> ClientConfig {
    let port = portpicker::pick_unused_port().expect("free port");
    ClientConfig::for_base_url(format!("http://127.0.0.1:{}/api", port))
}

/// Fresh scratch directory for file-backed stores
pub fn scratch_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("hrms-it-{}", uuid::Uuid::new_v4()))
}
