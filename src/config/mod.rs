//! Per-request options for the GraphQL HTTP binding.
//!
//! The binding asks an [`OptionsResolver`] for a [`RequestOptions`] value on
//! every request. A resolver is a plain function of the incoming request, so
//! the schema, root value, pretty-printing flag and middleware can all vary
//! per request (for example by header or by a `?pretty=1` toggle) without any
//! global state.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use graphql_http::{IncomingRequest, OptionsResolver, RequestOptions};
//! # use graphql_http::{Executor, ExecutionContext, ExecutionResult, ExecutorFault};
//! # struct Engine;
//! # impl Executor for Engine {
//! #     type Schema = String;
//! #     type RootValue = ();
//! #     type Middleware = ();
//! #     fn execute(&self, _: ExecutionContext<'_, Self>) -> Result<ExecutionResult, ExecutorFault> {
//! #         Ok(ExecutionResult::from_data(serde_json::Value::Null))
//! #     }
//! # }
//!
//! let base = RequestOptions::<Engine>::builder()
//!     .schema("type Query { test: String }".to_string())
//!     .build()
//!     .unwrap();
//!
//! let resolver: OptionsResolver<Engine> = Arc::new(move |request: &IncomingRequest| {
//!     base.clone().with_pretty(request.query_param("pretty") == Some("1"))
//! });
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::execution::Executor;
use crate::transport::IncomingRequest;

/// A function computing [`RequestOptions`] from the incoming request.
pub type OptionsResolver<E> =
    Arc<dyn Fn(&IncomingRequest) -> RequestOptions<E> + Send + Sync>;

/// The options applied to one request.
///
/// Cloning is cheap: the schema, root value and middleware are shared.
pub struct RequestOptions<E: Executor + ?Sized> {
    schema: Arc<E::Schema>,
    root_value: Option<Arc<E::RootValue>>,
    pretty: bool,
    middleware: Arc<[E::Middleware]>,
}

impl<E: Executor + ?Sized> RequestOptions<E> {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> RequestOptionsBuilder<E> {
        RequestOptionsBuilder::new()
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &E::Schema {
        &self.schema
    }

    /// Returns the root value, if configured.
    #[must_use]
    pub fn root_value(&self) -> Option<&E::RootValue> {
        self.root_value.as_deref()
    }

    /// Returns whether responses are pretty-printed.
    #[must_use]
    pub const fn pretty(&self) -> bool {
        self.pretty
    }

    /// Returns the middleware list.
    #[must_use]
    pub fn middleware(&self) -> &[E::Middleware] {
        &self.middleware
    }

    /// Returns a copy with the pretty flag replaced.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns a copy with the root value replaced.
    #[must_use]
    pub fn with_root_value(mut self, root_value: impl Into<Arc<E::RootValue>>) -> Self {
        self.root_value = Some(root_value.into());
        self
    }
}

impl<E: Executor + ?Sized> Clone for RequestOptions<E> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            root_value: self.root_value.clone(),
            pretty: self.pretty,
            middleware: Arc::clone(&self.middleware),
        }
    }
}

impl<E: Executor + ?Sized> fmt::Debug for RequestOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("has_root_value", &self.root_value.is_some())
            .field("pretty", &self.pretty)
            .field("middleware", &self.middleware.len())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing [`RequestOptions`] instances.
///
/// `schema` is required. Defaults: no root value, compact output, no
/// middleware.
pub struct RequestOptionsBuilder<E: Executor + ?Sized> {
    schema: Option<Arc<E::Schema>>,
    root_value: Option<Arc<E::RootValue>>,
    pretty: bool,
    middleware: Vec<E::Middleware>,
}

impl<E: Executor + ?Sized> RequestOptionsBuilder<E> {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: None,
            root_value: None,
            pretty: false,
            middleware: Vec::new(),
        }
    }

    /// Sets the schema (required).
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Arc<E::Schema>>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets the root value.
    #[must_use]
    pub fn root_value(mut self, root_value: impl Into<Arc<E::RootValue>>) -> Self {
        self.root_value = Some(root_value.into());
        self
    }

    /// Enables or disables pretty-printed responses.
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the middleware list.
    #[must_use]
    pub fn middleware(mut self, middleware: impl IntoIterator<Item = E::Middleware>) -> Self {
        self.middleware = middleware.into_iter().collect();
        self
    }

    /// Builds the [`RequestOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `schema` is not set.
    pub fn build(self) -> Result<RequestOptions<E>, ConfigError> {
        let schema = self
            .schema
            .ok_or(ConfigError::MissingRequiredField { field: "schema" })?;

        Ok(RequestOptions {
            schema,
            root_value: self.root_value,
            pretty: self.pretty,
            middleware: self.middleware.into(),
        })
    }
}

impl<E: Executor + ?Sized> Default for RequestOptionsBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
