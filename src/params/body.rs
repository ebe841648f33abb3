//! Content-type dispatch over request bodies.

use encoding_rs::Encoding;
use http::Method;
use serde_json::Value;

use crate::params::ParsedBody;
use crate::transport::{BindingError, ContentKind, IncomingRequest};

/// Name of the multipart field carrying the JSON operation.
pub const OPERATIONS_FIELD: &str = "operations";

/// Decodes the request body according to its content type.
///
/// | content type | result |
/// |---|---|
/// | absent or unknown | empty body |
/// | `application/graphql` | body text becomes `query` |
/// | `application/json` | body parsed as a JSON object |
/// | `application/x-www-form-urlencoded` | form fields (POST only) |
/// | `multipart/form-data` | the `operations` field parsed as JSON |
///
/// # Errors
///
/// - [`BindingError::UnsupportedCharset`] if the declared charset is unknown
/// - [`BindingError::InvalidBodyEncoding`] if the bytes do not decode
/// - [`BindingError::InvalidJson`] for a malformed JSON body
/// - [`BindingError::MissingOperations`] / [`BindingError::InvalidOperationsJson`]
///   for a multipart request without a usable `operations` field
pub fn decode_body(request: &IncomingRequest) -> Result<ParsedBody, BindingError> {
    match request.content_kind() {
        ContentKind::None | ContentKind::Other => Ok(ParsedBody::default()),
        ContentKind::GraphQL => Ok(ParsedBody {
            query: Some(decode_text(request)?),
            ..ParsedBody::default()
        }),
        ContentKind::Json => {
            let text = decode_text(request)?;
            let value: Value =
                serde_json::from_str(&text).map_err(|_| BindingError::InvalidJson)?;
            Ok(ParsedBody::from_json(value))
        }
        ContentKind::UrlEncoded => Ok(ParsedBody::from_fields(&post_fields(request)?)),
        ContentKind::Multipart => {
            let operations = request
                .form_field(OPERATIONS_FIELD)
                .ok_or(BindingError::MissingOperations)?;
            let value: Value = serde_json::from_str(operations)
                .map_err(|_| BindingError::InvalidOperationsJson)?;
            Ok(ParsedBody::from_json(value))
        }
    }
}

/// Returns the POST form fields of the request.
///
/// URL-encoded bodies are parsed here; multipart fields come from the HTTP
/// layer. Non-POST requests and other content types have no form fields.
///
/// # Errors
///
/// Returns the same charset errors as [`decode_body`] for URL-encoded bodies.
pub fn post_fields(request: &IncomingRequest) -> Result<Vec<(String, String)>, BindingError> {
    if request.method() != Method::POST {
        return Ok(Vec::new());
    }

    match request.content_kind() {
        ContentKind::UrlEncoded => {
            let text = decode_text(request)?;
            // form decoding is lossy and only rejects input that is not text
            serde_urlencoded::from_str::<Vec<(String, String)>>(&text).map_err(|_| {
                BindingError::InvalidBodyEncoding {
                    charset: request.charset(),
                }
            })
        }
        ContentKind::Multipart => Ok(request.form_fields().to_vec()),
        _ => Ok(Vec::new()),
    }
}

/// Decodes the body bytes as text in the request's declared charset.
fn decode_text(request: &IncomingRequest) -> Result<String, BindingError> {
    let charset = request.charset();
    let encoding = Encoding::for_label(charset.trim().as_bytes())
        .ok_or_else(|| BindingError::UnsupportedCharset {
            charset: charset.clone(),
        })?;

    // a BOM for another encoding must not override the declared charset
    let (text, had_errors) = encoding.decode_with_bom_removal(request.body());
    if had_errors {
        return Err(BindingError::InvalidBodyEncoding { charset });
    }

    Ok(text.into_owned())
}
