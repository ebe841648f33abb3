//! # GraphQL over HTTP
//!
//! A transport binding that sits in front of a GraphQL execution engine. It
//! turns an HTTP request into execution parameters (query text, variables,
//! operation name) and turns the execution result back into an HTTP
//! response.
//!
//! ## Overview
//!
//! This crate provides:
//! - Parameter resolution from the query string and the body via [`params`]
//! - Body decoding for `application/graphql`, `application/json`,
//!   `application/x-www-form-urlencoded` and `multipart/form-data`
//!   (the `operations` / `variables.<path>` upload convention)
//! - Status mapping and the JSON error envelope via [`GraphqlHttp`]
//! - Compact or pretty (sorted, 2-space indented) JSON output
//! - Per-request options through an [`OptionsResolver`]
//!
//! Parsing, validating and executing GraphQL is left to an [`Executor`]
//! implementation. Serving HTTP is left to whatever server calls
//! [`GraphqlHttp::handle`].
//!
//! ## Quick Start
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
//!     fn execute(&self, ctx: ExecutionContext<'_, Self>) -> Result<ExecutionResult, ExecutorFault> {
//!         let who = ctx
//!             .params
//!             .variables
//!             .as_ref()
//!             .and_then(|v| v["who"].as_str())
//!             .unwrap_or("World");
//!         Ok(ExecutionResult::from_data(json!({ "test": format!("Hello {who}") })))
//!     }
//! }
//!
//! let options = RequestOptions::<Hello>::builder()
//!     .schema(())
//!     .pretty(false)
//!     .build()
//!     .unwrap();
//! let binding = GraphqlHttp::new(Hello, options);
//!
//! let request = IncomingRequest::builder(Method::POST)
//!     .content_type("application/json")
//!     .body(br#"{"query":"query($who: String){ test(who: $who) }","variables":{"who":"Dolly"}}"#.to_vec())
//!     .build();
//!
//! let response = binding.handle(&request);
//! assert_eq!(response.status.as_u16(), 200);
//! assert_eq!(response.body, br#"{"data":{"test":"Hello Dolly"}}"#);
//! ```
//!
//! ## Error Responses
//!
//! Failures never escape as bare server errors. Request errors are reported
//! as `{"errors":[{"message": ...}]}`; executor faults and panics as an
//! invalid result, `{"data":null,"errors":[{"message":"<Kind>: <detail>"}]}`:
//!
//! | failure | status |
//! |---|---|
//! | method other than GET/POST | 405 with `Allow: GET, POST` |
//! | unknown charset | 415 |
//! | invalid JSON body, missing query, invalid variables | 400 |
//! | executor fault or panic | 400 |
//!
//! ## Design Principles
//!
//! - **No global state**: options are computed per request by a plain function
//! - **Pure resolution**: decoding and parameter resolution have no side effects
//! - **Thread-safe**: the handler is `Send + Sync` when the executor is
//! - **Synchronous**: the binding never suspends; the executor owns any async work

pub mod binding;
pub mod config;
pub mod error;
pub mod execution;
pub mod params;
pub mod transport;

// Re-export public types at crate root for convenience
pub use binding::GraphqlHttp;
pub use config::{OptionsResolver, RequestOptions, RequestOptionsBuilder};
pub use error::ConfigError;
pub use execution::{
    ExecutionContext, ExecutionError, ExecutionResult, Executor, ExecutorFault, GraphQLError,
    Location, PathSegment,
};
pub use params::{ExecutionParams, ParsedBody};
pub use transport::{
    BindingError, ContentKind, HttpResponse, IncomingRequest, IncomingRequestBuilder,
};
