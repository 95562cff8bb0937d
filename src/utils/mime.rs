//! MIME type registry.
//!
//! Maps file extensions to the `Content-Type` stored as object metadata.
//! Values carry no charset parameter; the storage service passes them
//! through verbatim.

use std::collections::BTreeMap;

/// Common MIME type constants.
pub mod types {
    // Text
    pub const HTML: &str = "text/html";
    pub const PLAIN: &str = "text/plain";
    pub const CSS: &str = "text/css";
    pub const JAVASCRIPT: &str = "application/javascript";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml";
    pub const MARKDOWN: &str = "text/markdown";
    pub const CSV: &str = "text/csv";
    pub const MANIFEST: &str = "application/manifest+json";

    // Web feeds
    pub const RSS: &str = "application/rss+xml";
    pub const ATOM: &str = "application/atom+xml";

    // Documents
    pub const PDF: &str = "application/pdf";

    // Binary
    pub const WASM: &str = "application/wasm";
    pub const ZIP: &str = "application/zip";
    pub const GZIP: &str = "application/gzip";
    pub const TAR: &str = "application/x-tar";

    // Images
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";
    pub const BMP: &str = "image/bmp";

    // Audio
    pub const MP3: &str = "audio/mpeg";
    pub const WAV: &str = "audio/wav";
    pub const OGG_AUDIO: &str = "audio/ogg";
    pub const FLAC: &str = "audio/flac";

    // Video
    pub const MP4: &str = "video/mp4";
    pub const WEBM: &str = "video/webm";
    pub const OGG_VIDEO: &str = "video/ogg";

    // Fonts
    pub const WOFF: &str = "font/woff";
    pub const WOFF2: &str = "font/woff2";
    pub const TTF: &str = "font/ttf";
    pub const OTF: &str = "font/otf";
    pub const EOT: &str = "application/vnd.ms-fontobject";
}

/// Built-in extension lookup. `ext` must already be lowercase and carry no dot.
fn builtin(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        // Web / Text
        "html" | "htm" => types::HTML,
        "css" => types::CSS,
        "js" | "mjs" | "cjs" => types::JAVASCRIPT,
        "json" | "map" => types::JSON,
        "webmanifest" => types::MANIFEST,
        "xml" => types::XML,
        "txt" => types::PLAIN,
        "md" => types::MARKDOWN,
        "csv" => types::CSV,

        // Web feeds
        "rss" => types::RSS,
        "atom" => types::ATOM,

        // Images
        "svg" => types::SVG,
        "png" => types::PNG,
        "jpg" | "jpeg" => types::JPEG,
        "gif" => types::GIF,
        "webp" => types::WEBP,
        "avif" => types::AVIF,
        "ico" => types::ICO,
        "bmp" => types::BMP,

        // Audio
        "mp3" => types::MP3,
        "wav" => types::WAV,
        "ogg" | "oga" => types::OGG_AUDIO,
        "flac" => types::FLAC,

        // Video
        "mp4" | "m4v" => types::MP4,
        "webm" => types::WEBM,
        "ogv" => types::OGG_VIDEO,

        // Fonts
        "woff" => types::WOFF,
        "woff2" => types::WOFF2,
        "ttf" => types::TTF,
        "otf" => types::OTF,
        "eot" => types::EOT,

        // Documents / Binary
        "pdf" => types::PDF,
        "wasm" => types::WASM,
        "zip" => types::ZIP,
        "gz" => types::GZIP,
        "tar" => types::TAR,

        _ => return None,
    };
    Some(mime)
}

/// Immutable extension → content-type table.
///
/// Built once from the `[mime]` config section and handed to the publisher
/// by reference. Extra entries take precedence over the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimeRegistry {
    extra: BTreeMap<String, String>,
}

impl MimeRegistry {
    /// Registry with the built-in table only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with additional (or overriding) mappings.
    ///
    /// Keys are normalized: a leading `.` is dropped and case is folded.
    pub fn with_extra<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let extra = entries
            .into_iter()
            .map(|(ext, mime)| (normalize_ext(ext.as_ref()), mime.into()))
            .collect();
        Self { extra }
    }

    /// Content type for an extension (without the dot), or `None` if unknown.
    pub fn lookup(&self, ext: &str) -> Option<&str> {
        let ext = normalize_ext(ext);
        if ext.is_empty() {
            return None;
        }
        self.extra
            .get(&ext)
            .map(String::as_str)
            .or_else(|| builtin(&ext))
    }

    /// Content type for an extension, empty when unknown.
    ///
    /// An empty content type is not an error: the storage service applies
    /// its own default.
    pub fn content_type(&self, ext: Option<&str>) -> String {
        ext.and_then(|e| self.lookup(e))
            .map(str::to_string)
            .unwrap_or_default()
    }
}

fn normalize_ext(ext: &str) -> String {
    ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_builtin() {
        let mime = MimeRegistry::new();
        assert_eq!(mime.lookup("html"), Some(types::HTML));
        assert_eq!(mime.lookup("css"), Some(types::CSS));
        assert_eq!(mime.lookup("js"), Some("application/javascript"));
        assert_eq!(mime.lookup("json"), Some("application/json"));
        assert_eq!(mime.lookup("png"), Some(types::PNG));
        assert_eq!(mime.lookup("woff2"), Some(types::WOFF2));
        assert_eq!(mime.lookup("gz"), Some(types::GZIP));
    }

    #[test]
    fn test_lookup_case_and_dot() {
        let mime = MimeRegistry::new();
        assert_eq!(mime.lookup("HTML"), Some(types::HTML));
        assert_eq!(mime.lookup(".css"), Some(types::CSS));
    }

    #[test]
    fn test_lookup_unknown() {
        let mime = MimeRegistry::new();
        assert_eq!(mime.lookup("unknownext"), None);
        assert_eq!(mime.lookup(""), None);
        assert_eq!(mime.content_type(Some("unknownext")), "");
        assert_eq!(mime.content_type(None), "");
    }

    #[test]
    fn test_extra_overrides_builtin() {
        let mime = MimeRegistry::with_extra([
            (".JS", "text/javascript"),
            ("glb", "model/gltf-binary"),
        ]);
        assert_eq!(mime.lookup("js"), Some("text/javascript"));
        assert_eq!(mime.lookup("glb"), Some("model/gltf-binary"));
        assert_eq!(mime.lookup("css"), Some(types::CSS));
    }
}
