//! Edge function resource.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;

use super::{Resource, ResourceType};
use crate::config::SiteConfig;
use crate::embed::edge::{FUNCTION_JS, FunctionVars};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FunctionArgs<'a> {
    runtime: &'a str,
    comment: &'a str,
    publish: bool,
    code: String,
}

/// Handler source: the configured file, or the built-in handler.
pub fn function_code(config: &SiteConfig) -> Result<String> {
    match &config.function.code {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read edge function {}", path.display())),
        None => Ok(FUNCTION_JS.render(&FunctionVars {
            index_document: &config.site.index,
        })),
    }
}

pub fn edge_function(config: &SiteConfig) -> Result<Resource> {
    let function = &config.function;
    let args = FunctionArgs {
        runtime: &function.runtime,
        comment: &function.comment,
        publish: function.publish,
        code: function_code(config)?,
    };
    Resource::new(&function.resource, ResourceType::Function, &args)
}
