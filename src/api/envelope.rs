use serde_json::Value;

use crate::error::{extract_server_message, ApiError};

/// How strictly the `success` flag of a response is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopePolicy {
    /// `success: true` is required
    Strict,
    /// A missing flag is accepted, `success: false` is still a failure
    Lenient,
}

/// Where the payload lives inside the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// `body.data`
    Data,
    /// `body.data.data` (paginated server collections)
    NestedData,
    /// The whole body
    Whole,
}

/// Check the envelope and pull out the payload
///
/// `collection` turns a null/missing payload into an empty list.
pub fn extract_payload(
    body: Value,
    policy: EnvelopePolicy,
    shape: PayloadShape,
    collection: bool,
) -> Result<Value, ApiError> {
    check_success(&body, policy)?;

    let payload = match shape {
        PayloadShape::Whole => body,
        PayloadShape::Data => take_field(body, "data"),
        PayloadShape::NestedData => take_field(take_field(body, "data"), "data"),
    };

    match payload {
        Value::Null if collection => Ok(Value::Array(Vec::new())),
        Value::Null => Err(ApiError::malformed("response has no data")),
        other => Ok(other),
    }
}

pub fn check_success(body: &Value, policy: EnvelopePolicy) -> Result<(), ApiError> {
    match (body.get("success").and_then(Value::as_bool), policy) {
        (Some(true), _) => Ok(()),
        (None, EnvelopePolicy::Lenient) if body.is_object() => Ok(()),
        _ => Err(ApiError::Unsuccessful {
            message: extract_server_message(body),
        }),
    }
}

/// A zero-length collection, or an object whose `data` list is empty
pub fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => matches!(map.get("data"), Some(Value::Array(items)) if items.is_empty()),
        _ => false,
    }
}

fn take_field(value: Value, field: &str) -> Value {
    match value {
        Value::Object(mut map) => map.remove(field).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
