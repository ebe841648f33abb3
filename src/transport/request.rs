//! Incoming request view for the GraphQL HTTP binding.
//!
//! This module provides [`IncomingRequest`], the read-only, request-scoped
//! view the binding works from, and its builder.

use http::header::CONTENT_TYPE;
use http::Method;
use mime::Mime;

use crate::transport::content_type::{ContentKind, DEFAULT_CHARSET};

/// A request as seen by the binding.
///
/// Holds the method, the raw `Content-Type` header, the body bytes, the
/// decoded query-string pairs and any form fields the HTTP layer already
/// parsed (for `multipart/form-data` uploads). Pairs keep their arrival
/// order; lookups by name return the last value.
///
/// # Example
///
/// ```rust
/// use graphql_http::IncomingRequest;
/// use http::Method;
///
/// let request = IncomingRequest::builder(Method::POST)
///     .content_type("application/graphql; charset=utf-16")
///     .query_string("variables=%7B%7D")
///     .body(b"{ test }".to_vec())
///     .build();
///
/// assert_eq!(request.media_type(), Some("application/graphql"));
/// assert_eq!(request.charset(), "utf-16");
/// assert_eq!(request.query_param("variables"), Some("{}"));
/// ```
#[derive(Clone, Debug)]
pub struct IncomingRequest {
    method: Method,
    content_type: Option<String>,
    body: Vec<u8>,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
}

// Verify IncomingRequest is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<IncomingRequest>();
};

impl IncomingRequest {
    /// Creates a new builder for the given method.
    #[must_use]
    pub fn builder(method: Method) -> IncomingRequestBuilder {
        IncomingRequestBuilder::new(method)
    }

    /// Builds a view over an `http::Request`.
    ///
    /// The method, `Content-Type` header, URI query and body are copied.
    /// Form fields cannot be recovered from a raw multipart body here; use
    /// [`IncomingRequestBuilder::form_field`] when the HTTP layer has parsed
    /// them.
    #[must_use]
    pub fn from_http<B: AsRef<[u8]>>(request: &http::Request<B>) -> Self {
        let mut builder = Self::builder(request.method().clone())
            .body(request.body().as_ref().to_vec());

        if let Some(content_type) = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            builder = builder.content_type(content_type);
        }

        if let Some(query) = request.uri().query() {
            builder = builder.query_string(query);
        }

        builder.build()
    }

    /// Returns the request method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the raw `Content-Type` header value, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the media type (`type/subtype`), without parameters.
    ///
    /// The text before the first `;` is trimmed but keeps its case, so
    /// `Application/JSON` is not `application/json`.
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        let raw = self.content_type.as_deref()?;
        Some(raw.split(';').next().unwrap_or_default().trim())
    }

    /// Classifies the request body by its media type.
    #[must_use]
    pub fn content_kind(&self) -> ContentKind {
        ContentKind::from_media_type(self.media_type())
    }

    /// Returns the declared body charset, defaulting to `utf-8`.
    #[must_use]
    pub fn charset(&self) -> String {
        self.parsed_content_type()
            .and_then(|mime| mime.get_param(mime::CHARSET).map(|c| c.as_str().to_string()))
            .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the last query-string value for `name`.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        last_value(&self.query, name)
    }

    /// Returns all query-string pairs in arrival order.
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the form fields supplied by the HTTP layer, in arrival order.
    #[must_use]
    pub fn form_fields(&self) -> &[(String, String)] {
        &self.form
    }

    /// Returns the last supplied form field value for `name`.
    #[must_use]
    pub fn form_field(&self, name: &str) -> Option<&str> {
        last_value(&self.form, name)
    }

    fn parsed_content_type(&self) -> Option<Mime> {
        self.content_type.as_deref()?.parse::<Mime>().ok()
    }
}

fn last_value<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Builder for constructing [`IncomingRequest`] instances.
#[derive(Debug)]
pub struct IncomingRequestBuilder {
    method: Method,
    content_type: Option<String>,
    body: Vec<u8>,
    raw_query: Option<String>,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
}

impl IncomingRequestBuilder {
    fn new(method: Method) -> Self {
        Self {
            method,
            content_type: None,
            body: Vec::new(),
            raw_query: None,
            query: Vec::new(),
            form: Vec::new(),
        }
    }

    /// Sets the raw `Content-Type` header value.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the raw, URL-encoded query string (without the leading `?`).
    ///
    /// It is decoded when the request is built; pairs added with
    /// [`query_param`](Self::query_param) come after it.
    #[must_use]
    pub fn query_string(mut self, query: impl Into<String>) -> Self {
        self.raw_query = Some(query.into());
        self
    }

    /// Adds a single, already-decoded query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a form field parsed by the HTTP layer.
    ///
    /// Repeated names are kept in order.
    #[must_use]
    pub fn form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    /// Builds the [`IncomingRequest`].
    ///
    /// The raw query string is percent-decoded leniently: malformed escapes
    /// are kept literally and invalid UTF-8 is replaced.
    #[must_use]
    pub fn build(self) -> IncomingRequest {
        // lossy decoding into string pairs cannot fail
        let mut query = self
            .raw_query
            .as_deref()
            .and_then(|raw| serde_urlencoded::from_str::<Vec<(String, String)>>(raw).ok())
            .unwrap_or_default();
        query.extend(self.query);

        IncomingRequest {
            method: self.method,
            content_type: self.content_type,
            body: self.body,
            query,
            form: self.form,
        }
    }
}
