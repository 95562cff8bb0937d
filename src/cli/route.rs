//! `sitedrop route`: which object the edge function would request.

use anyhow::Result;

use super::publish;
use crate::asset::AssetUpload;
use crate::config::SiteConfig;
use crate::edge::rewrite_uri;
use crate::log;

/// Outcome of routing one request against the published records.
#[derive(Debug, PartialEq)]
pub enum Routed<'a> {
    Found(&'a AssetUpload),
    Missing(String),
}

/// Rewrite `uri` and look the resulting key up in `uploads`.
pub fn resolve<'a>(
    uploads: &'a [AssetUpload],
    uri: &str,
    accept_encoding: Option<&str>,
    index: &str,
) -> Routed<'a> {
    let rewritten = rewrite_uri(uri, accept_encoding, index);
    let key = rewritten.trim_start_matches('/');
    match uploads.iter().find(|u| u.key == key) {
        Some(upload) => Routed::Found(upload),
        None => Routed::Missing(key.to_string()),
    }
}

pub fn run(config: &SiteConfig, uri: &str, accept_encoding: Option<&str>) -> Result<()> {
    let uploads = publish::collect(config)?;

    match resolve(&uploads, uri, accept_encoding, &config.site.index) {
        Routed::Found(upload) => {
            println!("key:              {}", upload.key);
            println!("content-type:     {}", upload.content_type);
            println!("content-encoding: {}", upload.content_encoding);
            println!("source:           {}", config.root_relative(&upload.source).display());
        }
        Routed::Missing(key) => {
            log!("warning"; "{uri} -> {key}: no published object, the distribution answers 403/404");
            anyhow::bail!("no object for `{key}`");
        }
    }
    Ok(())
}
