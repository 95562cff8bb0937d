//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sitedrop.toml`:
//!
//! | Module     | TOML Section   | Purpose                                   |
//! |------------|----------------|-------------------------------------------|
//! | `site`     | `[site]`       | Content root, index document              |
//! | `bucket`   | `[bucket]`     | Storage bucket and its access policy      |
//! | `function` | `[function]`   | Edge function                             |
//! | `cdn`      | `[cdn]`        | Distribution, cache policy, logging, geo  |
//! | `serve`    | `[serve]`      | Local preview server                      |
//!
//! The `[mime]` table has no struct of its own; it maps straight into
//! [`crate::utils::mime::MimeRegistry`].

mod bucket;
pub mod cdn;
pub mod function;
mod serve;
mod site;

// Re-export section configs
pub use bucket::BucketConfig;
pub use cdn::{
    CachePolicyConfig, CdnConfig, GeoConfig, LoggingConfig, PriceClass, RestrictionType,
    TtlConfig, ViewerProtocolPolicy,
};
pub use function::{EventType, FunctionConfig};
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;

/// Logical resource names end up as keys in the emitted program, where `.`
/// would break `${name.attr}` references.
fn is_resource_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}
