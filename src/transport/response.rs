//! HTTP response type produced by the binding.

use http::header::{HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};

/// Content type of every response the binding produces.
pub const APPLICATION_JSON: &str = "application/json";

/// A fully formatted response: status, headers and a JSON body.
///
/// The body is always a serialized JSON object and `Content-Type` is always
/// `application/json`.
///
/// # Example
///
/// ```rust
/// use graphql_http::HttpResponse;
/// use http::{HeaderMap, StatusCode};
///
/// let response = HttpResponse::new(StatusCode::OK, HeaderMap::new(), b"{}".to_vec());
/// assert!(response.is_ok());
/// assert_eq!(response.header("content-type"), Some("application/json"));
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// The serialized JSON body.
    pub body: Vec<u8>,
}

// Verify HttpResponse is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpResponse>();
};

impl HttpResponse {
    /// Creates a response, forcing `Content-Type: application/json`.
    #[must_use]
    pub fn new(status: StatusCode, mut headers: HeaderMap, body: Vec<u8>) -> Self {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the first value of a header, if present and valid text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Parses the body back into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body is not valid JSON, which
    /// never happens for responses built by the binding.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Converts into an `http::Response`.
    #[must_use]
    pub fn into_http(self) -> http::Response<Vec<u8>> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::ALLOW;
    use serde_json::json;

    #[test]
    fn test_content_type_is_always_json() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));

        let response = HttpResponse::new(StatusCode::OK, headers, b"{}".to_vec());
        assert_eq!(response.header("content-type"), Some(APPLICATION_JSON));
    }

    #[test]
    fn test_is_ok_for_2xx_only() {
        let ok = HttpResponse::new(StatusCode::OK, HeaderMap::new(), Vec::new());
        assert!(ok.is_ok());

        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::METHOD_NOT_ALLOWED,
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let response = HttpResponse::new(status, HeaderMap::new(), Vec::new());
            assert!(!response.is_ok(), "Expected is_ok() false for {status}");
        }
    }

    #[test]
    fn test_body_json_parses_body() {
        let response = HttpResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            br#"{"data":{"test":"Hello World"}}"#.to_vec(),
        );
        assert_eq!(
            response.body_json().unwrap(),
            json!({"data": {"test": "Hello World"}})
        );
    }

    #[test]
    fn test_into_http_keeps_status_headers_and_body() {
        let mut headers = HeaderMap::new();
        headers.insert(ALLOW, HeaderValue::from_static("GET, POST"));
        let response = HttpResponse::new(
            StatusCode::METHOD_NOT_ALLOWED,
            headers,
            b"{}".to_vec(),
        )
        .into_http();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(ALLOW).unwrap(), "GET, POST");
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), APPLICATION_JSON);
        assert_eq!(response.body(), b"{}");
    }
}
