//! Utility types for configuration.

mod error;

pub use error::{ConfigDiagnostics, ConfigError};

/// Dotted path of a config field, e.g. `"cdn.cache_policy.name"`.
pub type FieldPath = &'static str;
