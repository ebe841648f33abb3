//! Execution outcome types owned by the external executor.
//!
//! These mirror what a GraphQL engine reports back: the `data` tree, the
//! ordered error list, and whether the result is a top-level failure.

use std::any::Any;
use std::error::Error;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// A position in the query document, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Line number.
    pub line: usize,
    /// Column number.
    pub column: usize,
}

/// One step of a response path: a field name or a list index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A field (or alias) name.
    Field(String),
    /// A list index.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        Self::Field(value.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

/// An error reported by the GraphQL engine itself.
///
/// Serializes as `{message, locations?, path?}`: `locations` is omitted when
/// empty and `path` when absent.
///
/// # Example
///
/// ```rust
/// use graphql_http::GraphQLError;
///
/// let error = GraphQLError::new("Throws!").with_location(1, 2);
/// let json = serde_json::to_string(&error).unwrap();
/// assert_eq!(json, r#"{"message":"Throws!","locations":[{"line":1,"column":2}]}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphQLError {
    /// Human-readable description.
    pub message: String,
    /// Where in the document the error applies.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    /// Response path of the field that failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
}

impl GraphQLError {
    /// Creates an error with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: None,
        }
    }

    /// Adds a document location.
    #[must_use]
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.locations.push(Location { line, column });
        self
    }

    /// Sets the response path.
    #[must_use]
    pub fn with_path(mut self, path: impl IntoIterator<Item = PathSegment>) -> Self {
        self.path = Some(path.into_iter().collect());
        self
    }
}

/// A fault that is not a GraphQL error: something the engine or a resolver
/// raised that has a kind and a message but no document position.
///
/// Formatted as `"<kind>: <message>"`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ExecutorFault {
    /// Short name of the fault type.
    pub kind: String,
    /// The fault's own message.
    pub message: String,
}

impl ExecutorFault {
    /// Creates a fault from an explicit kind and message.
    #[must_use]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Creates a fault from any error, using the error type's short name
    /// as the kind.
    ///
    /// # Example
    ///
    /// ```rust
    /// use graphql_http::ExecutorFault;
    ///
    /// let err = "x".parse::<i32>().unwrap_err();
    /// let fault = ExecutorFault::from_error(&err);
    /// assert_eq!(fault.kind, "ParseIntError");
    /// ```
    #[must_use]
    pub fn from_error<E: Error + ?Sized>(error: &E) -> Self {
        Self::new(short_type_name::<E>(), error.to_string())
    }

    /// Creates a fault from a caught panic payload.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "executor panicked".to_string());
        Self::new("Panic", message)
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// One entry of an [`ExecutionResult`]'s error list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionError {
    /// An error reported by the engine, with locations and path.
    GraphQL(GraphQLError),
    /// Any other fault surfaced during execution.
    Fault(ExecutorFault),
}

impl From<GraphQLError> for ExecutionError {
    fn from(error: GraphQLError) -> Self {
        Self::GraphQL(error)
    }
}

impl From<ExecutorFault> for ExecutionError {
    fn from(fault: ExecutorFault) -> Self {
        Self::Fault(fault)
    }
}

impl Serialize for ExecutionError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::GraphQL(error) => error.serialize(serializer),
            Self::Fault(fault) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("message", &fault.to_string())?;
                map.end()
            }
        }
    }
}

/// The outcome of executing one operation.
///
/// `invalid` marks a top-level failure (syntax or validation errors, or no
/// data at all) as opposed to partial data with field-level errors. The
/// binding maps `invalid` to HTTP 400 and everything else to 200.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecutionResult {
    /// The `data` tree, or `None` when execution produced none.
    pub data: Option<Value>,
    /// Errors in the order the engine reported them.
    pub errors: Vec<ExecutionError>,
    /// Whether this result is a top-level failure.
    pub invalid: bool,
}

// Verify ExecutionResult is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ExecutionResult>();
};

impl ExecutionResult {
    /// A successful result without errors.
    #[must_use]
    pub fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
            invalid: false,
        }
    }

    /// A valid result carrying field-level errors next to (possibly null) data.
    #[must_use]
    pub fn with_errors(
        data: Option<Value>,
        errors: impl IntoIterator<Item = impl Into<ExecutionError>>,
    ) -> Self {
        Self {
            data,
            errors: errors.into_iter().map(Into::into).collect(),
            invalid: false,
        }
    }

    /// A top-level failure: no data, only errors.
    #[must_use]
    pub fn invalid(errors: impl IntoIterator<Item = impl Into<ExecutionError>>) -> Self {
        Self {
            data: None,
            errors: errors.into_iter().map(Into::into).collect(),
            invalid: true,
        }
    }
}
