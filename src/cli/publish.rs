//! `sitedrop publish`: list upload records.

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::Result;

use crate::asset::{self, AssetUpload, ContentEncoding};
use crate::config::SiteConfig;
use crate::log;
use crate::utils::plural_count;

/// Run the publisher over the configured content root.
pub fn collect(config: &SiteConfig) -> Result<Vec<AssetUpload>> {
    let root = config.content_dir();
    match asset::publish(root, &config.mime_registry()) {
        Ok(uploads) => Ok(uploads),
        Err(err) => {
            if err.path() == root {
                log!(
                    "error";
                    "content root {} is unusable, set `[site] content` or pass --content",
                    config.root_relative(root).display()
                );
            }
            Err(err.into())
        }
    }
}

pub fn run(config: &SiteConfig, json: bool, pretty: bool) -> Result<()> {
    let uploads = collect(config)?;

    let output = if json {
        let mut text = if pretty {
            serde_json::to_string_pretty(&uploads)?
        } else {
            serde_json::to_string(&uploads)?
        };
        text.push('\n');
        text
    } else {
        format_table(&uploads)
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    log!("publish"; "{}", summary(config, &uploads));
    Ok(())
}

/// `12 objects from www (3 br, 3 gzip)`
pub fn summary(config: &SiteConfig, uploads: &[AssetUpload]) -> String {
    let count = |encoding: ContentEncoding| {
        uploads
            .iter()
            .filter(|u| u.content_encoding == encoding)
            .count()
    };
    format!(
        "{} from {} ({} br, {} gzip)",
        plural_count(uploads.len(), "object"),
        config.root_relative(config.content_dir()).display(),
        count(ContentEncoding::Brotli),
        count(ContentEncoding::Gzip),
    )
}

/// Three aligned columns: key, content type, encoding. `-` marks empty metadata.
fn format_table(uploads: &[AssetUpload]) -> String {
    const HEADER: [&str; 3] = ["KEY", "CONTENT-TYPE", "ENCODING"];

    let cell = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
    let rows: Vec<[String; 3]> = uploads
        .iter()
        .map(|u| {
            [
                u.key.clone(),
                cell(&u.content_type),
                cell(u.content_encoding.as_str()),
            ]
        })
        .collect();

    let key_width = rows.iter().map(|r| r[0].len()).max().unwrap_or(0).max(HEADER[0].len());
    let type_width = rows.iter().map(|r| r[1].len()).max().unwrap_or(0).max(HEADER[1].len());

    let mut out = String::new();
    let _ = writeln!(out, "{:key_width$}  {:type_width$}  {}", HEADER[0], HEADER[1], HEADER[2]);
    for [key, content_type, encoding] in &rows {
        let _ = writeln!(out, "{key:key_width$}  {content_type:type_width$}  {encoding}");
    }
    out
}
