//! Pre-compressed variant detection from filename suffixes.

use std::fmt;

use serde::Serialize;

/// On-disk encoding of a published file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ContentEncoding {
    /// Plain file, no `Content-Encoding` header.
    #[default]
    #[serde(rename = "")]
    Identity,
    /// `*.br`
    #[serde(rename = "br")]
    Brotli,
    /// `*.gz`
    #[serde(rename = "gzip")]
    Gzip,
}

/// Compressed variants checked in order; the first matching suffix wins.
const VARIANTS: [ContentEncoding; 2] = [ContentEncoding::Brotli, ContentEncoding::Gzip];

impl ContentEncoding {
    /// Header value as stored in object metadata.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "",
            Self::Brotli => "br",
            Self::Gzip => "gzip",
        }
    }

    /// File name suffix of the variant, empty for identity.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Identity => "",
            Self::Brotli => ".br",
            Self::Gzip => ".gz",
        }
    }

    /// Split a file name into its encoding and the logical name underneath.
    ///
    /// Only the outermost suffix is stripped, so `app.js.gz.br` yields
    /// `(Brotli, "app.js.gz")`.
    ///
    /// ```text
    /// index.html     -> (Identity, "index.html")
    /// index.html.gz  -> (Gzip,     "index.html")
    /// style.css.br   -> (Brotli,   "style.css")
    /// ```
    pub fn split(file_name: &str) -> (Self, &str) {
        for encoding in VARIANTS {
            if let Some(stem) = file_name.strip_suffix(encoding.suffix()) {
                return (encoding, stem);
            }
        }
        (Self::Identity, file_name)
    }

    pub const fn is_identity(self) -> bool {
        matches!(self, Self::Identity)
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text after the last `.` of a file name, if any.
///
/// Dotfiles count as extensions (`.nojekyll` -> `nojekyll`), which leaves
/// them unmapped in the registry.
pub fn extension_of(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain() {
        assert_eq!(
            ContentEncoding::split("index.html"),
            (ContentEncoding::Identity, "index.html")
        );
    }

    #[test]
    fn test_split_compressed() {
        assert_eq!(
            ContentEncoding::split("index.html.gz"),
            (ContentEncoding::Gzip, "index.html")
        );
        assert_eq!(
            ContentEncoding::split("data.json.br"),
            (ContentEncoding::Brotli, "data.json")
        );
    }

    #[test]
    fn test_split_single_strip() {
        assert_eq!(
            ContentEncoding::split("f.gz.br"),
            (ContentEncoding::Brotli, "f.gz")
        );
        assert_eq!(
            ContentEncoding::split("f.br.gz"),
            (ContentEncoding::Gzip, "f.br")
        );
    }

    #[test]
    fn test_split_suffix_needs_dot() {
        // "zebr" ends with "br" but not ".br"
        assert_eq!(
            ContentEncoding::split("zebr"),
            (ContentEncoding::Identity, "zebr")
        );
    }

    #[test]
    fn test_as_str() {
        assert_eq!(ContentEncoding::Identity.as_str(), "");
        assert_eq!(ContentEncoding::Brotli.as_str(), "br");
        assert_eq!(ContentEncoding::Gzip.to_string(), "gzip");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("index.html"), Some("html"));
        assert_eq!(extension_of("archive.tar"), Some("tar"));
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of(".nojekyll"), Some("nojekyll"));
        assert_eq!(extension_of("trailing."), Some(""));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&[
            ContentEncoding::Identity,
            ContentEncoding::Brotli,
            ContentEncoding::Gzip,
        ])
        .unwrap();
        assert_eq!(json, r#"["","br","gzip"]"#);
    }
}
