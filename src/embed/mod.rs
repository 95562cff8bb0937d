//! Embedded static resources.
//!
//! - `template` - Template types for typed variable injection
//! - `edge` - Edge function source shipped to the CDN
//! - `serve` - Preview server pages
//!
//! # Usage
//!
//! ```ignore
//! use embed::edge::{FUNCTION_JS, FunctionVars};
//!
//! let code = FUNCTION_JS.render(&FunctionVars { index_document: "index.html" });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod edge {
    use super::{Template, TemplateVars};

    /// Variables for function.js.
    pub struct FunctionVars<'a> {
        pub index_document: &'a str,
    }

    impl TemplateVars for FunctionVars<'_> {
        fn apply(&self, content: &str) -> String {
            let escaped = self.index_document.replace('\\', "\\\\").replace('\'', "\\'");
            content.replace("__INDEX_DOCUMENT__", &escaped)
        }
    }

    /// Viewer-request handler rewriting URIs to pre-compressed objects.
    pub const FUNCTION_JS: Template<FunctionVars<'static>> =
        Template::new(include_str!("edge/function.js"));
}

pub mod serve {
    use super::{Template, TemplateVars};

    /// Variables for the preview 404 page.
    pub struct NotFoundVars<'a> {
        pub uri: &'a str,
        pub key: &'a str,
    }

    impl TemplateVars for NotFoundVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__URI__", &crate::utils::html::escape(self.uri))
                .replace("__KEY__", &crate::utils::html::escape(self.key))
        }
    }

    /// Page returned when no published object matches the rewritten URI.
    pub const NOT_FOUND_HTML: Template<NotFoundVars<'static>> =
        Template::new(include_str!("serve/not_found.html"));
}
