//! `sitedrop stack`: emit the program document.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::publish;
use crate::config::SiteConfig;
use crate::log;
use crate::stack::{self, ResourceType};
use crate::utils::plural_count;

pub fn run(config: &SiteConfig, output: Option<&Path>, pretty: bool) -> Result<()> {
    let uploads = publish::collect(config)?;
    let stack = stack::declare(config, &uploads)?;

    let mut text = stack.to_json(pretty)?;
    text.push('\n');

    match output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log!("stack"; "wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }

    log!(
        "stack";
        "{} ({})",
        plural_count(stack.resources.len(), "resource"),
        plural_count(stack.count(ResourceType::BucketObject), "object")
    );
    Ok(())
}
