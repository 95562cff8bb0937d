//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "static-site"     # Program/stack name in the emitted document
//! content = "www"          # Content root, relative to sitedrop.toml
//! index = "index.html"     # Bucket website index document + CDN root object
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Program name.
    pub name: String,

    /// Content root directory.
    pub content: PathBuf,

    /// Index document served for directory URIs.
    pub index: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            name: "static-site".to_string(),
            content: PathBuf::from("www"),
            index: "index.html".to_string(),
        }
    }
}

impl SiteSectionConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.error("site.name", "must not be empty");
        }
        // pasted into a single-quoted JS string by the edge function
        let unsafe_char = |c: char| matches!(c, '/' | '\'' | '"' | '\\') || c.is_control();
        if self.index.is_empty() || self.index.contains(unsafe_char) {
            diag.error_with_hint(
                "site.index",
                format!("invalid index document `{}`", self.index),
                "use a plain file name such as \"index.html\"",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_site_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.name, "static-site");
        assert_eq!(config.site.content, PathBuf::from("www"));
        assert_eq!(config.site.index, "index.html");
    }

    #[test]
    fn test_site_config() {
        let config = test_parse_config("[site]\ncontent = \"public\"\nindex = \"home.html\"");
        assert_eq!(config.site.content, PathBuf::from("public"));
        assert_eq!(config.site.index, "home.html");
    }

    #[test]
    fn test_site_index_validation() {
        let mut config = test_parse_config("[site]\nindex = \"docs/index.html\"");
        config.site.name = String::new();
        let mut diag = crate::config::ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        assert_eq!(diag.errors().len(), 2);
    }

    #[test]
    fn test_site_index_rejects_string_breaking_chars() {
        for index in ["a'b.html", "a\\b.html", "a\"b.html", "a\nb.html"] {
            let mut config = test_parse_config("");
            config.site.index = index.to_string();
            let mut diag = crate::config::ConfigDiagnostics::new();
            config.site.validate(&mut diag);
            assert_eq!(diag.errors().len(), 1, "{index:?}");
        }
    }
}
