//! Parameter resolution: turning a request into execution inputs.
//!
//! Resolution is a pure function over request-scoped data. It combines the
//! URL query string and the decoded body into the three execution inputs:
//!
//! - `query` from the query string when non-empty, else from the body
//! - `variables` from the query string when non-empty, else from the body,
//!   JSON-decoded when it arrives as a string
//! - `operationName` from the query string when non-empty, else from the body
//!
//! Each input is resolved independently, so a body can carry the query while
//! the query string carries the variables. After decoding, any
//! `variables.<path>` form fields are merged into the variables (see
//! [`merge_upload_fields`]).
//!
//! # Example
//!
//! ```rust
//! use graphql_http::{ExecutionParams, IncomingRequest};
//! use http::Method;
//! use serde_json::json;
//!
//! let request = IncomingRequest::builder(Method::POST)
//!     .content_type("application/json")
//!     .query_string("variables=%7B%22who%22%3A%22Dolly%22%7D")
//!     .body(br#"{"query":"query helloWho($who: String){ test(who: $who) }"}"#.to_vec())
//!     .build();
//!
//! let params = ExecutionParams::from_request(&request).unwrap();
//! assert_eq!(params.query, "query helloWho($who: String){ test(who: $who) }");
//! assert_eq!(params.variables, Some(json!({"who": "Dolly"})));
//! assert_eq!(params.operation_name, None);
//! ```

mod body;
mod upload;

pub use body::{decode_body, post_fields, OPERATIONS_FIELD};
pub use upload::{merge_upload_fields, UPLOAD_FIELD_PREFIX};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::transport::{BindingError, IncomingRequest};

/// The parameters a request body contributed.
///
/// `variables` may still be a JSON string at this stage; it is decoded
/// during [`resolve`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedBody {
    /// The `query` entry, if any.
    pub query: Option<String>,
    /// The `variables` entry, raw or structured.
    pub variables: Option<Value>,
    /// The `operationName` entry, if any.
    pub operation_name: Option<String>,
}

impl ParsedBody {
    /// Extracts the known keys from a JSON body.
    ///
    /// Anything other than an object contributes nothing. Non-string
    /// `query` or `operationName` entries are ignored and a `null`
    /// `variables` entry counts as absent.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let take_string = |value: Option<Value>| match value {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        Self {
            query: take_string(map.remove("query")),
            variables: map.remove("variables").filter(|v| !v.is_null()),
            operation_name: take_string(map.remove("operationName")),
        }
    }

    /// Extracts the known keys from decoded form fields.
    ///
    /// The last value of a repeated key wins; `variables` stays a string.
    #[must_use]
    pub fn from_fields(fields: &[(String, String)]) -> Self {
        let last = |name: &str| {
            fields
                .iter()
                .rev()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        };

        Self {
            query: last("query"),
            variables: last("variables").map(Value::String),
            operation_name: last("operationName"),
        }
    }
}

/// The three inputs handed to the executor.
///
/// `query` is never empty in a value produced by [`resolve`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionParams {
    /// The GraphQL document text.
    pub query: String,
    /// Decoded variables, absent when none were sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
    /// Which operation of the document to run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl ExecutionParams {
    /// Decodes the body and resolves parameters in one step.
    ///
    /// # Errors
    ///
    /// Returns any [`BindingError`] from [`decode_body`] or [`resolve`].
    pub fn from_request(request: &IncomingRequest) -> Result<Self, BindingError> {
        let body = decode_body(request)?;
        resolve(request, body)
    }
}

/// Resolves execution parameters from the query string and a decoded body.
///
/// # Errors
///
/// - [`BindingError::MissingQuery`] if neither source has a non-empty query
/// - [`BindingError::InvalidVariablesJson`] if string variables fail to parse
/// - [`BindingError::InvalidUploadPath`] if a `variables.<path>` field
///   cannot be placed
pub fn resolve(request: &IncomingRequest, body: ParsedBody) -> Result<ExecutionParams, BindingError> {
    let query = query_param(request, "query")
        .map(str::to_string)
        .or_else(|| body.query.filter(|q| !q.is_empty()))
        .ok_or(BindingError::MissingQuery)?;

    let raw_variables = query_param(request, "variables")
        .map(|raw| Value::String(raw.to_string()))
        .or(body.variables);
    let mut variables = match raw_variables {
        Some(raw) => decode_variables(raw)?,
        None => None,
    };

    let operation_name = query_param(request, "operationName")
        .map(str::to_string)
        .or_else(|| body.operation_name.filter(|name| !name.is_empty()));

    merge_upload_fields(&mut variables, &post_fields(request)?)?;

    tracing::debug!(
        operation_name = operation_name.as_deref().unwrap_or_default(),
        has_variables = variables.is_some(),
        "Resolved GraphQL request parameters"
    );

    Ok(ExecutionParams {
        query,
        variables,
        operation_name,
    })
}

fn query_param<'a>(request: &'a IncomingRequest, name: &str) -> Option<&'a str> {
    request.query_param(name).filter(|value| !value.is_empty())
}

fn decode_variables(raw: Value) -> Result<Option<Value>, BindingError> {
    let decoded = match raw {
        Value::String(text) => {
            serde_json::from_str(&text).map_err(|_| BindingError::InvalidVariablesJson)?
        }
        other => other,
    };
    Ok(Some(decoded).filter(|v: &Value| !v.is_null()))
}
