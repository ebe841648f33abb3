//! JSON response envelopes and serialization modes.

use http::{HeaderMap, StatusCode};
use serde_json::{Map, Value};

use crate::execution::{ExecutionResult, ExecutorFault};
use crate::transport::{BindingError, HttpResponse};

/// Body sent if an envelope itself cannot be serialized.
const FALLBACK_BODY: &[u8] =
    br#"{"data":null,"errors":[{"message":"Error: response could not be serialized."}]}"#;

/// Builds `{"data": ..., "errors"?: [...]}` from an execution result.
///
/// `data` is always present (possibly `null`); `errors` only when the
/// result carries any.
///
/// # Errors
///
/// Returns the `serde_json` error if an error entry fails to serialize.
pub fn result_envelope(result: ExecutionResult) -> Result<Value, serde_json::Error> {
    let mut envelope = Map::new();
    envelope.insert("data".to_string(), result.data.unwrap_or(Value::Null));
    if !result.errors.is_empty() {
        envelope.insert("errors".to_string(), serde_json::to_value(&result.errors)?);
    }
    Ok(Value::Object(envelope))
}

/// Builds `{"errors": [{"message": ...}]}` for a binding error.
#[must_use]
pub fn error_envelope(error: &BindingError) -> Value {
    let mut entry = Map::new();
    entry.insert("message".to_string(), Value::String(error.to_string()));

    let mut envelope = Map::new();
    envelope.insert(
        "errors".to_string(),
        Value::Array(vec![Value::Object(entry)]),
    );
    Value::Object(envelope)
}

/// Builds `{"data": null, "errors": [{"message": "<kind>: <message>"}]}`.
///
/// Used when the result envelope of a fault cannot be produced normally.
#[must_use]
pub fn fault_envelope(fault: &ExecutorFault) -> Value {
    let mut entry = Map::new();
    entry.insert("message".to_string(), Value::String(fault.to_string()));

    let mut envelope = Map::new();
    envelope.insert("data".to_string(), Value::Null);
    envelope.insert(
        "errors".to_string(),
        Value::Array(vec![Value::Object(entry)]),
    );
    Value::Object(envelope)
}

/// Serializes a value compactly, or sorted and indented by two spaces.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
///
/// # Example
///
/// ```rust
/// use graphql_http::binding::json_dump;
/// use serde_json::json;
///
/// let value = json!({"data": {"test": "Hello World"}});
/// assert_eq!(json_dump(&value, false).unwrap(), br#"{"data":{"test":"Hello World"}}"#);
/// assert_eq!(
///     json_dump(&value, true).unwrap(),
///     b"{\n  \"data\": {\n    \"test\": \"Hello World\"\n  }\n}",
/// );
/// ```
pub fn json_dump(value: &Value, pretty: bool) -> Result<Vec<u8>, serde_json::Error> {
    if pretty {
        serde_json::to_vec_pretty(&sort_keys(value))
    } else {
        serde_json::to_vec(value)
    }
}

/// Serializes `body` into a response, falling back to a fixed error body.
pub(crate) fn respond(
    status: StatusCode,
    headers: HeaderMap,
    body: &Value,
    pretty: bool,
) -> HttpResponse {
    match json_dump(body, pretty) {
        Ok(bytes) => HttpResponse::new(status, headers, bytes),
        Err(err) => {
            tracing::error!("Failed to serialize GraphQL response: {}", err);
            HttpResponse::new(
                StatusCode::BAD_REQUEST,
                HeaderMap::new(),
                FALLBACK_BODY.to_vec(),
            )
        }
    }
}

/// Formats a binding error as a complete response.
pub(crate) fn error_response(error: &BindingError, pretty: bool) -> HttpResponse {
    respond(error.status(), error.headers(), &error_envelope(error), pretty)
}

// serde_json keeps insertion order under `preserve_order`, so sort explicitly
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
