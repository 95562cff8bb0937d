//! Upload record: source file → object key + metadata.

use std::path::PathBuf;

use serde::Serialize;

use super::ContentEncoding;

/// One object to hand to the storage upload.
///
/// Created once per file during the publish walk and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUpload {
    /// Object key: path relative to the content root, `/`-separated.
    pub key: String,
    /// File the bytes are read from (not loaded here).
    pub source: PathBuf,
    /// `Content-Type` metadata, empty when the extension is unknown.
    pub content_type: String,
    /// `Content-Encoding` metadata.
    pub content_encoding: ContentEncoding,
}
