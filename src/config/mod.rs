//! Site configuration management for `sitedrop.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── bucket     # [bucket]
//! │   ├── cdn        # [cdn] and sub-sections
//! │   ├── function   # [function]
//! │   ├── serve      # [serve]
//! │   └── site       # [site]
//! ├── types/         # ConfigError, ConfigDiagnostics
//! ├── util.rs        # config file lookup
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! Every field has a default, so a project without `sitedrop.toml` deploys
//! `www/` with the stock bucket / CDN topology.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BucketConfig, CdnConfig, FunctionConfig, ServeConfig, SiteSectionConfig};
pub use types::{ConfigDiagnostics, ConfigError};

use crate::{
    cli::{Cli, Commands},
    debug, log,
    utils::mime::MimeRegistry,
    utils::path::normalize_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitedrop.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Content root and index document
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Extra extension → content-type mappings
    #[serde(default)]
    pub mime: BTreeMap<String, String>,

    /// Storage bucket settings
    #[serde(default)]
    pub bucket: BucketConfig,

    /// Edge function settings
    #[serde(default)]
    pub function: FunctionConfig,

    /// Distribution settings
    #[serde(default)]
    pub cdn: CdnConfig,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when no file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd.clone(),
                    config_path: cwd.join(&cli.config),
                    ..Self::default()
                }
            }
        };

        config.finalize(cli);
        debug!("config"; "root {} (config {})", config.root.display(), config.config_path.display());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Content root directory (absolute after loading).
    pub fn content_dir(&self) -> &Path {
        &self.site.content
    }

    /// MIME registry with the `[mime]` overrides applied.
    pub fn mime_registry(&self) -> MimeRegistry {
        MimeRegistry::with_extra(&self.mime)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn finalize(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        Self::update_option(&mut self.site.content, cli.content.as_ref());
        self.normalize_paths();
        self.apply_command_options(cli);
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        if let Commands::Serve { interface, port } = &cli.command {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve paths against the project root, with `~` expansion.
    fn normalize_paths(&mut self) {
        let root = normalize_path(&self.root);
        self.root = root.clone();

        self.site.content = Self::resolve(&self.site.content, &root);
        if let Some(code) = self.function.code.take() {
            self.function.code = Some(Self::resolve(&code, &root));
        }
    }

    fn resolve(path: &Path, root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        let path = PathBuf::from(expanded);
        let full_path = if path.is_relative() {
            root.join(&path)
        } else {
            path
        };
        normalize_path(&full_path)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.bucket.validate(&mut diag);
        self.function.validate(&mut diag);
        self.cdn.validate(&mut diag);

        for (ext, mime) in &self.mime {
            if !mime.contains('/') {
                diag.error_with_hint(
                    "mime",
                    format!("`{ext}` maps to `{mime}`, which is not a MIME type"),
                    "use the `type/subtype` form, e.g. \"model/gltf-binary\"",
                );
            }
        }

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_toml() {
        let result = SiteConfig::parse_with_ignored("[site\ncontent = \"www\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.content, PathBuf::from("www"));
        assert_eq!(config.bucket.resource, "s3-site-bucket");
        assert_eq!(config.cdn.ttl.default, 3600);
        assert_eq!(config.serve.port, 5280);
        assert!(config.mime.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ncontent = \"www\"\n[unknown_section]\nfield = \"value\"\n[cdn]\nttls = 1";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.content, PathBuf::from("www"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
        assert!(ignored.iter().any(|f| f.contains("ttls")));
    }

    #[test]
    fn test_mime_section() {
        let config = test_parse_config("[mime]\nglb = \"model/gltf-binary\"\n\".JS\" = \"text/javascript\"");
        let mime = config.mime_registry();
        assert_eq!(mime.lookup("glb"), Some("model/gltf-binary"));
        assert_eq!(mime.lookup("js"), Some("text/javascript"));
    }

    #[test]
    fn test_mime_validation() {
        let config = test_parse_config("[mime]\nglb = \"binary\"");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("glb"));
    }

    #[test]
    fn test_root_relative() {
        let config = SiteConfig {
            root: PathBuf::from("/srv/site"),
            ..SiteConfig::default()
        };
        assert_eq!(
            config.root_relative("/srv/site/www/index.html"),
            PathBuf::from("www/index.html")
        );
        assert_eq!(config.root_relative("/elsewhere/a"), PathBuf::from("/elsewhere/a"));
    }

    #[test]
    fn test_resolve_relative_to_root() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("public")).unwrap();

        let resolved = SiteConfig::resolve(Path::new("public"), &normalize_path(dir.path()));
        assert_eq!(resolved, normalize_path(&dir.path().join("public")));
    }
}
