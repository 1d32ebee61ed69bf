use serde_json::{json, Value};
use std::time::Duration;

use super::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::models::User;
use crate::session::Credentials;

/// Token and user returned by `POST /login`
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub token: String,
    pub user: User,
    /// Raw `user` object as sent by the server, persisted verbatim
    pub raw_user: Value,
}

pub async fn login(api: &ApiClient, credentials: &Credentials, timeout: Duration) -> Result<LoginGrant, ApiError> {
    let body = json!({
        "role": credentials.role.as_str(),
        "email": credentials.email,
        "password": credentials.password,
    });
    let options = RequestOptions::new()
        .header("Content-Type", "application/json")
        .json(body)
        .timeout(timeout);

    let response = api.post("/login", options).await?;
    parse_grant(response.data)
}

fn parse_grant(mut body: Value) -> Result<LoginGrant, ApiError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Unsuccessful {
            message: crate::error::extract_server_message(&body),
        });
    }

    let token = body
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::malformed("login response has no token"))?;

    let raw_user = body
        .get_mut("user")
        .map(Value::take)
        .filter(Value::is_object)
        .ok_or_else(|| ApiError::malformed("login response has no user"))?;
    let user: User = serde_json::from_value(raw_user.clone())
        .map_err(|e| ApiError::malformed(format!("login user: {}", e)))?;

    Ok(LoginGrant { token, user, raw_user })
}
