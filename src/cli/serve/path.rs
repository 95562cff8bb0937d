//! Request URL to edge URI.

use percent_encoding::percent_decode_str;

/// Decode a request URL into the URI the edge function sees.
///
/// Drops the query string and fragment and percent-decodes the path. The
/// trailing `/` is kept since it selects the index document. Invalid UTF-8
/// after decoding yields `None`.
pub fn request_uri(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8().ok()?;

    if decoded.starts_with('/') {
        Some(decoded.into_owned())
    } else {
        Some(format!("/{decoded}"))
    }
}
