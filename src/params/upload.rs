//! The `variables.<path>` form-field convention used by upload clients.
//!
//! Multipart clients send the operation as JSON in an `operations` field and
//! bind each uploaded file to a variable with a field named after its path,
//! e.g. `variables.input.files.0`. The field's value is written at that path
//! inside the decoded variables.

use serde_json::{Map, Value};

use crate::transport::BindingError;

/// Prefix marking a form field as a variable override.
pub const UPLOAD_FIELD_PREFIX: &str = "variables.";

/// Writes every `variables.<path>` field into `variables`.
///
/// Absent variables start as an empty object. Paths are dot-separated;
/// numeric segments index into existing arrays and missing intermediate
/// objects are created. Later fields overwrite earlier ones.
///
/// # Errors
///
/// Returns [`BindingError::InvalidUploadPath`] if a path has an empty
/// segment, runs through a scalar, or indexes past the end of an array.
///
/// # Example
///
/// ```rust
/// use graphql_http::params::merge_upload_fields;
/// use serde_json::json;
///
/// let mut variables = Some(json!({"input": {"files": [null, null]}}));
/// let fields = vec![("variables.input.files.1".to_string(), "upload-1".to_string())];
///
/// merge_upload_fields(&mut variables, &fields).unwrap();
/// assert_eq!(variables, Some(json!({"input": {"files": [null, "upload-1"]}})));
/// ```
pub fn merge_upload_fields(
    variables: &mut Option<Value>,
    fields: &[(String, String)],
) -> Result<(), BindingError> {
    for (name, value) in fields {
        let Some(path) = name.strip_prefix(UPLOAD_FIELD_PREFIX) else {
            continue;
        };

        let target = variables.get_or_insert_with(|| Value::Object(Map::new()));
        assign_path(target, path, Value::String(value.clone())).ok_or_else(|| {
            BindingError::InvalidUploadPath {
                field: name.clone(),
            }
        })?;
    }

    Ok(())
}

fn assign_path(target: &mut Value, path: &str, value: Value) -> Option<()> {
    let mut segments = path.split('.').peekable();
    let mut current = target;

    while let Some(segment) = segments.next() {
        if segment.is_empty() {
            return None;
        }

        let slot = match current {
            Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
            Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };

        if segments.peek().is_none() {
            *slot = value;
            return Some(());
        }

        if slot.is_null() {
            *slot = Value::Object(Map::new());
        }
        current = slot;
    }

    None
}
