//! `[function]` section configuration.
//!
//! The edge function rewrites viewer requests towards pre-compressed
//! objects. Its source is compiled into the binary; `code` replaces it.
//!
//! # Example
//!
//! ```toml
//! [function]
//! resource = "redirect_compressed_and_cache"
//! runtime = "cloudfront-js-1.0"
//! comment = "serve pre-compressed variants"
//! publish = true
//! event = "viewer-request"
//! code = "edge/function.js"     # Optional: replace the built-in handler
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionConfig {
    /// Logical name of the function resource.
    pub resource: String,

    /// Function runtime identifier.
    pub runtime: String,

    /// Free-form description.
    pub comment: String,

    /// Publish to the live stage on update.
    pub publish: bool,

    /// Distribution event the function is associated with.
    pub event: EventType,

    /// Handler source overriding the built-in one.
    pub code: Option<PathBuf>,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            resource: "redirect_compressed_and_cache".to_string(),
            runtime: "cloudfront-js-1.0".to_string(),
            comment: "Rewrite requests to pre-compressed objects".to_string(),
            publish: true,
            event: EventType::ViewerRequest,
            code: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    ViewerRequest,
    ViewerResponse,
}

impl EventType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewerRequest => "viewer-request",
            Self::ViewerResponse => "viewer-response",
        }
    }
}

impl FunctionConfig {
    /// Validate function configuration.
    ///
    /// # Checks
    /// - `resource` is a usable resource name
    /// - `code`, when set, points to an existing file
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !super::is_resource_name(&self.resource) {
            diag.error("function.resource", format!("invalid resource name `{}`", self.resource));
        }
        if let Some(path) = &self.code {
            if !path.exists() {
                diag.error("function.code", format!("file not found: {}", path.display()));
            } else if !path.is_file() {
                diag.error("function.code", format!("not a file: {}", path.display()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EventType;
    use crate::config::test_parse_config;

    #[test]
    fn test_function_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.function.resource, "redirect_compressed_and_cache");
        assert_eq!(config.function.runtime, "cloudfront-js-1.0");
        assert!(config.function.publish);
        assert_eq!(config.function.event, EventType::ViewerRequest);
        assert!(config.function.code.is_none());
    }

    #[test]
    fn test_function_event() {
        let config = test_parse_config("[function]\nevent = \"viewer-response\"");
        assert_eq!(config.function.event, EventType::ViewerResponse);
    }

    #[test]
    fn test_function_missing_code() {
        let config = test_parse_config("[function]\ncode = \"/nonexistent/function.js\"");
        let mut diag = crate::config::ConfigDiagnostics::new();
        config.function.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, "function.code");
    }
}
