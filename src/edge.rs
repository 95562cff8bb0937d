//! Local model of the viewer-request edge function.
//!
//! Mirrors `embed/edge/function.js` so previews and `route` agree with
//! what the distribution will request from the bucket.

use crate::asset::ContentEncoding;

/// Encoding the handler picks for an `Accept-Encoding` value.
///
/// Substring match, brotli first. A missing header behaves like an empty one.
pub fn negotiate(accept_encoding: Option<&str>) -> ContentEncoding {
    let accept = accept_encoding.unwrap_or_default();
    if accept.contains("br") {
        ContentEncoding::Brotli
    } else if accept.contains("gzip") {
        ContentEncoding::Gzip
    } else {
        ContentEncoding::Identity
    }
}

/// Rewrite a request URI the way the edge function does.
///
/// A trailing `/` gets `index` appended, then the suffix of the negotiated
/// encoding. The result is never checked against published objects.
pub fn rewrite_uri(uri: &str, accept_encoding: Option<&str>, index: &str) -> String {
    let mut rewritten = String::from(uri);
    if rewritten.ends_with('/') {
        rewritten.push_str(index);
    }
    rewritten.push_str(negotiate(accept_encoding).suffix());
    rewritten
}
