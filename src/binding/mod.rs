//! The GraphQL-over-HTTP request handler.
//!
//! [`GraphqlHttp`] orchestrates one request end to end:
//!
//! 1. resolve the per-request options
//! 2. reject methods other than GET and POST (405, `Allow: GET, POST`)
//! 3. decode the body and resolve parameters (see [`crate::params`])
//! 4. call the [`Executor`]
//! 5. map the outcome to a status and a JSON body
//!
//! Every failure short-circuits straight to step 5. Nothing is retried and
//! nothing escapes as a non-JSON response: executor faults and panics become
//! an invalid result, reported as 400 with
//! `{"data":null,"errors":[{"message":"<kind>: <message>"}]}`.
//!
//! # Status mapping
//!
//! | outcome | status |
//! |---|---|
//! | result with `invalid == false` | 200 |
//! | result with `invalid == true` | 400 |
//! | executor fault or panic | 400 |
//! | [`BindingError`] | [`BindingError::status`] |
//!
//! # Example
//!
//! ```rust
//! use graphql_http::{
//!     ExecutionContext, ExecutionResult, Executor, ExecutorFault, GraphqlHttp,
//!     IncomingRequest, RequestOptions,
//! };
//! use http::Method;
//! use serde_json::json;
//!
//! struct Hello;
//!
//! impl Executor for Hello {
//!     type Schema = ();
//!     type RootValue = ();
//!     type Middleware = ();
//!
//!     fn execute(&self, _ctx: ExecutionContext<'_, Self>) -> Result<ExecutionResult, ExecutorFault> {
//!         Ok(ExecutionResult::from_data(json!({"test": "Hello World"})))
//!     }
//! }
//!
//! let options = RequestOptions::<Hello>::builder().schema(()).build().unwrap();
//! let binding = GraphqlHttp::new(Hello, options);
//!
//! let request = IncomingRequest::builder(Method::GET)
//!     .query_string("query=%7Btest%7D")
//!     .build();
//!
//! let response = binding.handle(&request);
//! assert_eq!(response.status.as_u16(), 200);
//! assert_eq!(response.body, br#"{"data":{"test":"Hello World"}}"#);
//! ```

mod format;

pub use format::{error_envelope, fault_envelope, json_dump, result_envelope};

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use http::{HeaderMap, Method, StatusCode};

use crate::config::{OptionsResolver, RequestOptions};
use crate::execution::{ExecutionContext, ExecutionResult, Executor, ExecutorFault};
use crate::params::ExecutionParams;
use crate::transport::{BindingError, HttpResponse, IncomingRequest};

/// GraphQL-over-HTTP handler wrapping an [`Executor`].
///
/// The handler holds no per-request state and can serve concurrent requests
/// from any number of threads when the executor is `Send + Sync`.
pub struct GraphqlHttp<E: Executor> {
    executor: E,
    options: OptionsResolver<E>,
}

impl<E: Executor> GraphqlHttp<E> {
    /// Creates a handler that uses the same options for every request.
    #[must_use]
    pub fn new(executor: E, options: RequestOptions<E>) -> Self
    where
        E: 'static,
        E::Schema: Send + Sync,
        E::RootValue: Send + Sync,
        E::Middleware: Send + Sync,
    {
        Self::dynamic(
            executor,
            Arc::new(move |_: &IncomingRequest| options.clone()),
        )
    }

    /// Creates a handler that computes its options from each request.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use graphql_http::{GraphqlHttp, IncomingRequest, RequestOptions};
    /// # use graphql_http::{Executor, ExecutionContext, ExecutionResult, ExecutorFault};
    /// # struct Engine;
    /// # impl Executor for Engine {
    /// #     type Schema = ();
    /// #     type RootValue = ();
    /// #     type Middleware = ();
    /// #     fn execute(&self, _: ExecutionContext<'_, Self>) -> Result<ExecutionResult, ExecutorFault> {
    /// #         Ok(ExecutionResult::from_data(serde_json::json!({"test": "Hello World"})))
    /// #     }
    /// # }
    ///
    /// let base = RequestOptions::<Engine>::builder().schema(()).build().unwrap();
    /// let binding = GraphqlHttp::dynamic(
    ///     Engine,
    ///     Arc::new(move |request: &IncomingRequest| {
    ///         base.clone().with_pretty(request.query_param("pretty") == Some("1"))
    ///     }),
    /// );
    /// ```
    #[must_use]
    pub fn dynamic(executor: E, options: OptionsResolver<E>) -> Self {
        Self { executor, options }
    }

    /// Returns the wrapped executor.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Handles one request using the configured options resolver.
    #[must_use]
    pub fn handle(&self, request: &IncomingRequest) -> HttpResponse {
        let options = (self.options)(request);
        self.handle_with(request, &options)
    }

    /// Handles one request with explicit options.
    #[must_use]
    pub fn handle_with(&self, request: &IncomingRequest, options: &RequestOptions<E>) -> HttpResponse {
        let pretty = options.pretty();

        if request.method() != Method::GET && request.method() != Method::POST {
            return reject(
                &BindingError::MethodNotAllowed {
                    method: request.method().to_string(),
                },
                pretty,
            );
        }

        let params = match ExecutionParams::from_request(request) {
            Ok(params) => params,
            Err(error) => return reject(&error, pretty),
        };

        let result = self.execute(request, &params, options).unwrap_or_else(|fault| {
            tracing::warn!(
                kind = %fault.kind,
                "GraphQL executor failed: {}",
                fault.message
            );
            ExecutionResult::invalid([fault])
        });

        let status = if result.invalid {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::OK
        };

        match result_envelope(result) {
            Ok(body) => format::respond(status, HeaderMap::new(), &body, pretty),
            Err(err) => {
                tracing::error!("Failed to serialize GraphQL errors: {}", err);
                let fault = ExecutorFault::from_error(&err);
                format::respond(
                    StatusCode::BAD_REQUEST,
                    HeaderMap::new(),
                    &format::fault_envelope(&fault),
                    pretty,
                )
            }
        }
    }

    /// Handles an `http::Request` and returns an `http::Response`.
    ///
    /// Multipart form fields are not available from a raw request; servers
    /// accepting uploads should build an [`IncomingRequest`] themselves.
    #[must_use]
    pub fn handle_http<B: AsRef<[u8]>>(&self, request: &http::Request<B>) -> http::Response<Vec<u8>> {
        self.handle(&IncomingRequest::from_http(request)).into_http()
    }

    fn execute(
        &self,
        request: &IncomingRequest,
        params: &ExecutionParams,
        options: &RequestOptions<E>,
    ) -> Result<ExecutionResult, ExecutorFault> {
        let ctx = ExecutionContext {
            schema: options.schema(),
            root_value: options.root_value(),
            request,
            params,
            middleware: options.middleware(),
        };

        panic::catch_unwind(AssertUnwindSafe(|| self.executor.execute(ctx)))
            .unwrap_or_else(|payload| Err(ExecutorFault::from_panic(payload.as_ref())))
    }
}

impl<E: Executor + fmt::Debug> fmt::Debug for GraphqlHttp<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphqlHttp")
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

fn reject(error: &BindingError, pretty: bool) -> HttpResponse {
    tracing::debug!(
        status = error.status().as_u16(),
        "Rejected GraphQL request: {}",
        error
    );
    format::error_response(error, pretty)
}
