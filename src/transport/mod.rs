//! HTTP transport surface of the GraphQL binding.
//!
//! This module holds the types exchanged with the hosting HTTP server:
//!
//! - [`IncomingRequest`]: read-only view of one request
//! - [`HttpResponse`]: the formatted JSON response
//! - [`ContentKind`]: the closed set of body formats the binding decodes
//! - [`BindingError`]: every request-level failure, with its status code
//!
//! The binding never owns a socket. Any server that can produce an
//! [`http::Request`] (or fill an [`IncomingRequestBuilder`]) can drive it.

mod content_type;
mod errors;
mod request;
mod response;

pub use content_type::{ContentKind, DEFAULT_CHARSET};
pub use errors::{BindingError, ALLOWED_METHODS};
pub use request::{IncomingRequest, IncomingRequestBuilder};
pub use response::{HttpResponse, APPLICATION_JSON};
