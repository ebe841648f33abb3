//! Request-level error types for the GraphQL HTTP binding.
//!
//! Every failure the binding can detect before or around execution is a
//! [`BindingError`]. Each variant knows its HTTP status and any extra headers
//! the response must carry, and its `Display` output is exactly the message
//! placed in the JSON error envelope.
//!
//! # Example
//!
//! ```rust
//! use graphql_http::BindingError;
//!
//! let error = BindingError::UnsupportedCharset {
//!     charset: "utf-53".to_string(),
//! };
//! assert_eq!(error.status().as_u16(), 415);
//! assert_eq!(error.to_string(), r#"Unsupported charset "UTF-53"."#);
//! ```

use http::header::{HeaderValue, ALLOW};
use http::{HeaderMap, StatusCode};
use thiserror::Error;

/// Value of the `Allow` header sent with 405 responses.
pub const ALLOWED_METHODS: &str = "GET, POST";

/// Error produced while decoding a request or resolving its parameters.
///
/// A `BindingError` is created at the point of failure and consumed
/// immediately by the response formatter. It is never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The request used a method other than GET or POST.
    #[error("GraphQL only supports GET and POST requests.")]
    MethodNotAllowed {
        /// The rejected method.
        method: String,
    },

    /// The body declared a charset that cannot be decoded.
    #[error("Unsupported charset \"{}\".", .charset.to_uppercase())]
    UnsupportedCharset {
        /// The charset label as sent by the client.
        charset: String,
    },

    /// The body bytes are not valid in the declared charset.
    #[error("POST body is not valid \"{}\" text.", .charset.to_uppercase())]
    InvalidBodyEncoding {
        /// The charset the body was decoded with.
        charset: String,
    },

    /// An `application/json` body failed to parse.
    #[error("POST body sent invalid JSON.")]
    InvalidJson,

    /// A multipart request did not carry the `operations` field.
    #[error("Multipart request is missing the \"operations\" field.")]
    MissingOperations,

    /// The multipart `operations` field is not valid JSON.
    #[error("Multipart \"operations\" field sent invalid JSON.")]
    InvalidOperationsJson,

    /// No query could be found in the query string or the body.
    #[error("Must provide query string.")]
    MissingQuery,

    /// The `variables` string failed to parse as JSON.
    #[error("Variables are invalid JSON.")]
    InvalidVariablesJson,

    /// A `variables.<path>` form field points somewhere it cannot be placed.
    #[error("Cannot map form field \"{field}\" into variables.")]
    InvalidUploadPath {
        /// The full form field name.
        field: String,
    },
}

impl BindingError {
    /// Returns the HTTP status this error is reported with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedCharset { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidBodyEncoding { .. }
            | Self::InvalidJson
            | Self::MissingOperations
            | Self::InvalidOperationsJson
            | Self::MissingQuery
            | Self::InvalidVariablesJson
            | Self::InvalidUploadPath { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns the extra headers that must be merged onto the response.
    #[must_use]
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if matches!(self, Self::MethodNotAllowed { .. }) {
            headers.insert(ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_not_allowed_carries_allow_header() {
        let error = BindingError::MethodNotAllowed {
            method: "PUT".to_string(),
        };
        assert_eq!(error.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            error.headers().get(ALLOW).unwrap(),
            &HeaderValue::from_static("GET, POST")
        );
        assert_eq!(
            error.to_string(),
            "GraphQL only supports GET and POST requests."
        );
    }

    #[test]
    fn test_unsupported_charset_uppercases_label() {
        let error = BindingError::UnsupportedCharset {
            charset: "foobar".to_string(),
        };
        assert_eq!(error.to_string(), r#"Unsupported charset "FOOBAR"."#);
        assert_eq!(error.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_bad_request_messages() {
        assert_eq!(
            BindingError::InvalidJson.to_string(),
            "POST body sent invalid JSON."
        );
        assert_eq!(
            BindingError::MissingQuery.to_string(),
            "Must provide query string."
        );
        assert_eq!(
            BindingError::InvalidVariablesJson.to_string(),
            "Variables are invalid JSON."
        );
        for error in [
            BindingError::InvalidJson,
            BindingError::MissingQuery,
            BindingError::InvalidVariablesJson,
            BindingError::MissingOperations,
            BindingError::InvalidOperationsJson,
        ] {
            assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_only_method_not_allowed_sets_headers() {
        assert!(BindingError::MissingQuery.headers().is_empty());
        assert!(BindingError::UnsupportedCharset {
            charset: "x".to_string()
        }
        .headers()
        .is_empty());
    }

    #[test]
    fn test_statuses_stay_within_binding_range() {
        let errors = [
            BindingError::MethodNotAllowed {
                method: "PUT".to_string(),
            },
            BindingError::UnsupportedCharset {
                charset: "utf-53".to_string(),
            },
            BindingError::InvalidBodyEncoding {
                charset: "utf-8".to_string(),
            },
            BindingError::InvalidUploadPath {
                field: "variables.".to_string(),
            },
        ];
        for error in errors {
            assert!(matches!(error.status().as_u16(), 400 | 405 | 415));
        }
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: &dyn std::error::Error = &BindingError::MissingQuery;
        let _ = error;
    }
}
