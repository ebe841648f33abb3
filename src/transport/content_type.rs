//! Media types the binding knows how to decode.

/// Default charset applied when a body declares none.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// The body formats recognized by the GraphQL-over-HTTP binding.
///
/// Dispatch over request bodies is a closed set: anything not listed here
/// falls into [`ContentKind::Other`] and contributes no parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    /// No `Content-Type` header was sent.
    None,
    /// `application/graphql`: the body is the query text.
    GraphQL,
    /// `application/json`: the body is a JSON object.
    Json,
    /// `application/x-www-form-urlencoded`: the body is a form.
    UrlEncoded,
    /// `multipart/form-data`: the `operations` field holds the JSON body.
    Multipart,
    /// Any other media type.
    Other,
}

impl ContentKind {
    /// Classifies a media type (type/subtype without parameters).
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_media_type(media_type: Option<&str>) -> Self {
        match media_type {
            None => Self::None,
            Some("application/graphql") => Self::GraphQL,
            Some("application/json") => Self::Json,
            Some("application/x-www-form-urlencoded") => Self::UrlEncoded,
            Some("multipart/form-data") => Self::Multipart,
            Some(_) => Self::Other,
        }
    }
}
