//! HTTP response handlers.

use crate::asset::AssetUpload;
use crate::utils::mime::types::{HTML, PLAIN};
use anyhow::{Context, Result};
use std::fs::File;
use tiny_http::{Header, Request, Response, StatusCode};

/// Respond with a published object and its stored metadata.
///
/// HEAD gets the same response; tiny_http drops the body but keeps the length.
pub fn respond_object(request: Request, upload: &AssetUpload) -> Result<()> {
    let mut headers = vec![make_header("Vary", "Accept-Encoding")?];
    if !upload.content_type.is_empty() {
        headers.push(make_header("Content-Type", &upload.content_type)?);
    }
    if !upload.content_encoding.is_identity() {
        headers.push(make_header("Content-Encoding", upload.content_encoding.as_str())?);
    }

    let file = File::open(&upload.source)
        .with_context(|| format!("Failed to open {}", upload.source.display()))?;
    // always send Content-Length instead of switching to chunked
    let response = Response::from_file(file).with_chunked_threshold(usize::MAX);
    send(request, response, headers)
}

/// Respond with 404, naming the key the request was rewritten to.
pub fn respond_not_found(request: Request, uri: &str, key: &str) -> Result<()> {
    use crate::embed::serve::{NOT_FOUND_HTML, NotFoundVars};

    let headers = vec![
        make_header("Content-Type", HTML)?,
        make_header("Vary", "Accept-Encoding")?,
    ];
    let body = NOT_FOUND_HTML.render(&NotFoundVars { uri, key });
    send(
        request,
        Response::from_data(body.into_bytes()).with_status_code(StatusCode(404)),
        headers,
    )
}

/// Respond with 405 for anything but GET and HEAD.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let headers = vec![make_header("Content-Type", PLAIN)?, make_header("Allow", "GET, HEAD")?];
    send(
        request,
        Response::from_data(b"405 Method Not Allowed".to_vec()).with_status_code(StatusCode(405)),
        headers,
    )
}

/// Respond with 400 for URLs that do not decode to UTF-8.
pub fn respond_bad_request(request: Request) -> Result<()> {
    let headers = vec![make_header("Content-Type", PLAIN)?];
    send(
        request,
        Response::from_data(b"400 Bad Request".to_vec()).with_status_code(StatusCode(400)),
        headers,
    )
}

fn send<R: std::io::Read>(request: Request, mut response: Response<R>, headers: Vec<Header>) -> Result<()> {
    for header in headers {
        response.add_header(header);
    }
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid header `{key}: {value}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_header() {
        let header = make_header("Content-Encoding", "br").unwrap();
        assert!(header.field.equiv("content-encoding"));
        assert_eq!(header.value.as_str(), "br");
    }

    #[test]
    fn test_make_header_rejects_non_ascii() {
        assert!(make_header("X-Test", "café").is_err());
    }
}
