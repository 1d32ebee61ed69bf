use serde_json::Value;

use super::client::{ApiClient, RequestOptions};
use super::envelope::{check_success, EnvelopePolicy};
use crate::error::ApiError;
use crate::session::SessionContext;

/// Resolve the attachment URL of a policy document
///
/// `Ok(None)` means the policy has no attached file.
pub async fn download_url(api: &ApiClient, session: &SessionContext, policy_id: &str) -> Result<Option<String>, ApiError> {
    let token = session.bearer_token().await?;
    let path = format!("/policies/{}/download", policy_id);
    let response = api.get(&path, RequestOptions::authorized(token)).await?;

    match check_success(&response.data, EnvelopePolicy::Strict) {
        Ok(()) => Ok(response
            .data
            .get("file_url")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string)),
        Err(ApiError::Unsuccessful { message: None }) => Ok(None),
        Err(e) => Err(e),
    }
}
