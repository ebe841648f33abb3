//! The seam between the binding and a GraphQL execution engine.
//!
//! Parsing, validation and field resolution are not part of this crate. The
//! binding hands resolved parameters to an [`Executor`] and formats whatever
//! [`ExecutionResult`] comes back.
//!
//! # Implementing an executor
//!
//! ```rust
//! use graphql_http::{ExecutionContext, ExecutionResult, Executor, ExecutorFault};
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
//!             .and_then(|v| v.get("who"))
//!             .and_then(|v| v.as_str())
//!             .unwrap_or("World");
//!         Ok(ExecutionResult::from_data(json!({ "test": format!("Hello {who}") })))
//!     }
//! }
//! ```
//!
//! The executor is called synchronously. Any suspension it needs is its
//! own business; a returned [`ExecutorFault`] or a panic is reported to the
//! client as a JSON error rather than escaping the handler.

mod result;

pub use result::{
    ExecutionError, ExecutionResult, ExecutorFault, GraphQLError, Location, PathSegment,
};

use crate::params::ExecutionParams;
use crate::transport::IncomingRequest;

/// Everything an executor receives for one operation.
pub struct ExecutionContext<'a, E: Executor + ?Sized> {
    /// The schema to execute against.
    pub schema: &'a E::Schema,
    /// The root value, if one was configured.
    pub root_value: Option<&'a E::RootValue>,
    /// The incoming request, passed as the execution context value.
    pub request: &'a IncomingRequest,
    /// Query text, variables and operation name.
    pub params: &'a ExecutionParams,
    /// Middleware to apply during field resolution.
    pub middleware: &'a [E::Middleware],
}

/// An external GraphQL execution capability.
///
/// Mirrors the classic
/// `execute(schema, query, rootValue, contextValue, variables, operationName, middleware)`
/// signature, with the arguments grouped into an [`ExecutionContext`].
pub trait Executor {
    /// Schema type understood by the engine.
    type Schema;
    /// Root value type passed to top-level resolvers.
    type RootValue;
    /// Middleware type applied by the engine.
    type Middleware;

    /// Executes one operation.
    ///
    /// # Errors
    ///
    /// Returns an [`ExecutorFault`] when the engine fails outside of normal
    /// GraphQL error reporting.
    fn execute(&self, ctx: ExecutionContext<'_, Self>) -> Result<ExecutionResult, ExecutorFault>;
}
