//! `[cdn]` section configuration.
//!
//! Distribution in front of the bucket plus the cache policy keyed on
//! `Accept-Encoding`, so that brotli and gzip variants cache separately.
//!
//! # Example
//!
//! ```toml
//! [cdn]
//! resource = "s3Distribution"
//! origin_id = "mySiteOrigin"
//! comment = "Static Site distribution"
//! ipv6 = true
//! price_class = "PriceClass_200"         # PriceClass_All | PriceClass_200 | PriceClass_100
//! viewer_protocol_policy = "allow-all"   # allow-all | https-only | redirect-to-https
//! aliases = []
//! tags = { Environment = "production" }
//!
//! [cdn.ttl]
//! min = 0
//! default = 3600
//! max = 86400
//!
//! [cdn.cache_policy]
//! resource = "cachePolicy"
//! name = "precompressed_static_site_cache_policy"
//! comment = "Cache policy for static site"
//! headers = ["Accept-Encoding"]
//!
//! [cdn.logging]
//! enable = true
//! bucket = "wbe-logs.s3.amazonaws.com"
//! prefix = "site"
//! include_cookies = false
//!
//! [cdn.geo]
//! restriction = "whitelist"              # none | whitelist | blacklist
//! locations = ["US", "CA", "GB", "DE"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ConfigDiagnostics;

/// Distribution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnConfig {
    /// Logical name of the distribution resource.
    pub resource: String,

    /// Origin identifier shared by the origin and the default behavior.
    pub origin_id: String,

    pub comment: String,

    pub enabled: bool,

    pub ipv6: bool,

    pub price_class: PriceClass,

    pub viewer_protocol_policy: ViewerProtocolPolicy,

    /// Alternate domain names. Requires a non-default certificate upstream.
    pub aliases: Vec<String>,

    pub tags: BTreeMap<String, String>,

    /// TTLs shared by the cache policy and the default cache behavior.
    pub ttl: TtlConfig,

    pub cache_policy: CachePolicyConfig,

    pub logging: LoggingConfig,

    pub geo: GeoConfig,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            resource: "s3Distribution".to_string(),
            origin_id: "mySiteOrigin".to_string(),
            comment: "Static Site distribution".to_string(),
            enabled: true,
            ipv6: true,
            price_class: PriceClass::PriceClass200,
            viewer_protocol_policy: ViewerProtocolPolicy::AllowAll,
            aliases: Vec::new(),
            tags: BTreeMap::from([("Environment".to_string(), "production".to_string())]),
            ttl: TtlConfig::default(),
            cache_policy: CachePolicyConfig::default(),
            logging: LoggingConfig::default(),
            geo: GeoConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceClass {
    #[serde(rename = "PriceClass_All")]
    PriceClassAll,
    #[serde(rename = "PriceClass_200")]
    PriceClass200,
    #[serde(rename = "PriceClass_100")]
    PriceClass100,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocolPolicy {
    AllowAll,
    HttpsOnly,
    RedirectToHttps,
}

/// Cache lifetimes in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlConfig {
    pub min: u64,
    pub default: u64,
    pub max: u64,
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            min: 0,
            default: 3600,
            max: 86400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachePolicyConfig {
    /// Logical name of the cache policy resource.
    pub resource: String,

    /// Policy name as registered with the CDN (account-unique).
    pub name: String,

    pub comment: String,

    /// Request headers included in the cache key.
    pub headers: Vec<String>,
}

impl Default for CachePolicyConfig {
    fn default() -> Self {
        Self {
            resource: "cachePolicy".to_string(),
            name: "precompressed_static_site_cache_policy".to_string(),
            comment: "Cache policy for static site".to_string(),
            headers: vec!["Accept-Encoding".to_string()],
        }
    }
}

/// Access logging to a separate bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enable: bool,
    /// Log bucket domain, e.g. `logs.s3.amazonaws.com`.
    pub bucket: String,
    pub prefix: String,
    pub include_cookies: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable: true,
            bucket: "wbe-logs.s3.amazonaws.com".to_string(),
            prefix: "site".to_string(),
            include_cookies: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    pub restriction: RestrictionType,
    /// ISO 3166-1 alpha-2 country codes.
    pub locations: Vec<String>,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            restriction: RestrictionType::Whitelist,
            locations: ["US", "CA", "GB", "DE"].map(String::from).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionType {
    None,
    Whitelist,
    Blacklist,
}

impl CdnConfig {
    /// Validate distribution configuration.
    ///
    /// # Checks
    /// - resource names and origin id are usable
    /// - `ttl.min <= ttl.default <= ttl.max`
    /// - cache policy name uses `[A-Za-z0-9_-]` only
    /// - logging bucket is set when logging is enabled
    /// - geo locations are two uppercase letters, and present unless `none`
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !super::is_resource_name(&self.resource) {
            diag.error("cdn.resource", format!("invalid resource name `{}`", self.resource));
        }
        if !super::is_resource_name(&self.cache_policy.resource) {
            diag.error(
                "cdn.cache_policy.resource",
                format!("invalid resource name `{}`", self.cache_policy.resource),
            );
        }
        if self.origin_id.trim().is_empty() {
            diag.error("cdn.origin_id", "must not be empty");
        }

        self.ttl.validate(diag);

        let name = &self.cache_policy.name;
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            diag.error_with_hint(
                "cdn.cache_policy.name",
                format!("invalid cache policy name `{name}`"),
                "use letters, digits, `_` and `-` only",
            );
        }

        if self.logging.enable && self.logging.bucket.trim().is_empty() {
            diag.error_with_hint(
                "cdn.logging.bucket",
                "logging is enabled but no bucket is configured",
                "set cdn.logging.bucket or cdn.logging.enable = false",
            );
        }

        self.geo.validate(diag);
    }
}

impl TtlConfig {
    fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.min > self.default {
            diag.error(
                "cdn.ttl.min",
                format!("min ({}) exceeds default ({})", self.min, self.default),
            );
        }
        if self.default > self.max {
            diag.error(
                "cdn.ttl.default",
                format!("default ({}) exceeds max ({})", self.default, self.max),
            );
        }
    }
}

impl GeoConfig {
    fn validate(&self, diag: &mut ConfigDiagnostics) {
        match self.restriction {
            RestrictionType::None if !self.locations.is_empty() => {
                diag.error_with_hint(
                    "cdn.geo.locations",
                    "locations are set but restriction is `none`",
                    "use restriction = \"whitelist\" or \"blacklist\"",
                );
            }
            RestrictionType::Whitelist | RestrictionType::Blacklist
                if self.locations.is_empty() =>
            {
                diag.error("cdn.geo.locations", "restriction needs at least one location");
            }
            _ => {}
        }

        for code in &self.locations {
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                diag.error_with_hint(
                    "cdn.geo.locations",
                    format!("invalid country code `{code}`"),
                    "use ISO 3166-1 alpha-2 codes such as \"US\"",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_cdn_config_defaults() {
        let config = test_parse_config("");
        let cdn = &config.cdn;

        assert_eq!(cdn.resource, "s3Distribution");
        assert_eq!(cdn.origin_id, "mySiteOrigin");
        assert_eq!(cdn.price_class, PriceClass::PriceClass200);
        assert_eq!(cdn.viewer_protocol_policy, ViewerProtocolPolicy::AllowAll);
        assert_eq!(cdn.ttl, TtlConfig { min: 0, default: 3600, max: 86400 });
        assert_eq!(cdn.cache_policy.headers, vec!["Accept-Encoding"]);
        assert_eq!(cdn.geo.restriction, RestrictionType::Whitelist);
        assert_eq!(cdn.geo.locations, vec!["US", "CA", "GB", "DE"]);
        assert_eq!(cdn.tags.get("Environment").map(String::as_str), Some("production"));

        let mut diag = ConfigDiagnostics::new();
        cdn.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_cdn_config_overrides() {
        let config = test_parse_config(
            r#"[cdn]
price_class = "PriceClass_100"
viewer_protocol_policy = "redirect-to-https"

[cdn.ttl]
default = 60

[cdn.geo]
restriction = "blacklist"
locations = ["RU"]"#,
        );

        assert_eq!(config.cdn.price_class, PriceClass::PriceClass100);
        assert_eq!(
            config.cdn.viewer_protocol_policy,
            ViewerProtocolPolicy::RedirectToHttps
        );
        // untouched fields keep their defaults
        assert_eq!(config.cdn.ttl, TtlConfig { min: 0, default: 60, max: 86400 });
        assert_eq!(config.cdn.geo.restriction, RestrictionType::Blacklist);
    }

    #[test]
    fn test_cdn_invalid_price_class() {
        let result = crate::config::SiteConfig::parse_with_ignored("[cdn]\nprice_class = \"cheap\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_ttl_ordering() {
        let config = test_parse_config("[cdn.ttl]\nmin = 7200\ndefault = 3600\nmax = 60");
        let mut diag = ConfigDiagnostics::new();
        config.cdn.validate(&mut diag);

        let fields: Vec<_> = diag.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["cdn.ttl.min", "cdn.ttl.default"]);
    }

    #[test]
    fn test_geo_validation() {
        let config = test_parse_config("[cdn.geo]\nlocations = [\"us\", \"DEU\"]");
        let mut diag = ConfigDiagnostics::new();
        config.cdn.validate(&mut diag);
        assert_eq!(diag.errors().len(), 2);

        let config = test_parse_config("[cdn.geo]\nrestriction = \"none\"\nlocations = []");
        let mut diag = ConfigDiagnostics::new();
        config.cdn.validate(&mut diag);
        assert!(diag.is_empty());

        let config = test_parse_config("[cdn.geo]\nlocations = []");
        let mut diag = ConfigDiagnostics::new();
        config.cdn.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, "cdn.geo.locations");
    }

    #[test]
    fn test_logging_requires_bucket() {
        let config = test_parse_config("[cdn.logging]\nbucket = \"\"");
        let mut diag = ConfigDiagnostics::new();
        config.cdn.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, "cdn.logging.bucket");

        let config = test_parse_config("[cdn.logging]\nenable = false\nbucket = \"\"");
        let mut diag = ConfigDiagnostics::new();
        config.cdn.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_cache_policy_name() {
        let config = test_parse_config("[cdn.cache_policy]\nname = \"my policy\"");
        let mut diag = ConfigDiagnostics::new();
        config.cdn.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, "cdn.cache_policy.name");
    }
}
