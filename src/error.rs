//! Configuration error types for the GraphQL HTTP binding.
//!
//! Request-level failures live in [`crate::transport::BindingError`]; this module
//! only covers mistakes made while assembling the binding itself.
//!
//! # Example
//!
//! ```rust
//! use graphql_http::{ConfigError, RequestOptions};
//! # use graphql_http::{Executor, ExecutionContext, ExecutionResult, ExecutorFault};
//! # struct Engine;
//! # impl Executor for Engine {
//! #     type Schema = ();
//! #     type RootValue = ();
//! #     type Middleware = ();
//! #     fn execute(&self, _: ExecutionContext<'_, Self>) -> Result<ExecutionResult, ExecutorFault> {
//! #         Ok(ExecutionResult::from_data(serde_json::Value::Null))
//! #     }
//! # }
//!
//! let result = RequestOptions::<Engine>::builder().build();
//! assert!(matches!(result, Err(ConfigError::MissingRequiredField { field: "schema" })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the binding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the options.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
