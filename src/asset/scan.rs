//! Content root walk (pure, filesystem reads only).

use std::io;
use std::path::{Component, Path, PathBuf};

use jwalk::{Parallelism, WalkDir};
use thiserror::Error;

use super::encoding::extension_of;
use super::{AssetUpload, ContentEncoding};
use crate::utils::mime::MimeRegistry;

/// Publishing failed before any record was handed on.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("cannot read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PublishError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path the failure was reported for.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } => path,
        }
    }
}

/// Produce one upload record per file under `content_root`.
///
/// ```text
/// www/
/// ├── index.html       -> index.html       text/html
/// ├── index.html.gz    -> index.html.gz    text/html  gzip
/// └── css/
///     └── style.css.br -> css/style.css.br text/css   br
/// ```
///
/// Directories produce no record. The walk is serial and sorted by file
/// name, so the same tree always yields the same sequence.
///
/// # Errors
///
/// The first unreadable entry aborts the whole walk; no partial list is
/// returned.
pub fn publish(content_root: &Path, mime: &MimeRegistry) -> Result<Vec<AssetUpload>, PublishError> {
    let meta = std::fs::metadata(content_root).map_err(|e| PublishError::io(content_root, e))?;
    if !meta.is_dir() {
        return Err(PublishError::io(
            content_root,
            io::Error::new(io::ErrorKind::InvalidInput, "content root is not a directory"),
        ));
    }

    let walk = WalkDir::new(content_root)
        .parallelism(Parallelism::Serial)
        .sort(true)
        .skip_hidden(false)
        .follow_links(false);

    let mut records = Vec::new();
    for entry in walk {
        let mut entry = entry.map_err(|err| walk_error(content_root, &err))?;

        if entry.file_type().is_dir() {
            // jwalk yields unlistable directories as `Ok`
            if let Some(err) = entry.read_children_error.take() {
                return Err(walk_error(&entry.path(), &err));
            }
            continue;
        }

        records.push(upload_record(content_root, entry.path(), mime)?);
    }

    Ok(records)
}

/// Convert a walk failure, reported at `fallback` when jwalk has no path.
fn walk_error(fallback: &Path, err: &jwalk::Error) -> PublishError {
    let path = err.path().unwrap_or(fallback).to_path_buf();
    let kind = err.io_error().map_or(io::ErrorKind::Other, io::Error::kind);
    PublishError::Io {
        path,
        source: io::Error::new(kind, err.to_string()),
    }
}

/// Build the record for a single file below `content_root`.
fn upload_record(
    content_root: &Path,
    source: PathBuf,
    mime: &MimeRegistry,
) -> Result<AssetUpload, PublishError> {
    let key = object_key(content_root, &source)?;
    let file_name = key.rsplit('/').next().unwrap_or(&key);

    let (content_encoding, logical_name) = ContentEncoding::split(file_name);
    let content_type = mime.content_type(extension_of(logical_name));

    Ok(AssetUpload {
        key,
        source,
        content_type,
        content_encoding,
    })
}

/// `/`-joined path of `path` relative to `root`.
fn object_key(root: &Path, path: &Path) -> Result<String, PublishError> {
    let rel = path
        .strip_prefix(root)
        .map_err(|_| PublishError::io(path, invalid_data("entry outside content root")))?;

    let mut parts = Vec::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            let part = part
                .to_str()
                .ok_or_else(|| PublishError::io(path, invalid_data("path is not valid UTF-8")))?;
            parts.push(part);
        }
    }

    Ok(parts.join("/"))
}

fn invalid_data(message: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
