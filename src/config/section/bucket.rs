//! `[bucket]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [bucket]
//! resource = "s3-site-bucket"   # Logical name of the bucket resource
//! policy = "bucketPolicy"       # Logical name of the bucket policy resource
//! public_read = true            # Declare the public-read policy
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketConfig {
    /// Logical name of the bucket resource.
    pub resource: String,

    /// Logical name of the bucket policy resource.
    pub policy: String,

    /// Grant anonymous `s3:GetObject` on every object.
    pub public_read: bool,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            resource: "s3-site-bucket".to_string(),
            policy: "bucketPolicy".to_string(),
            public_read: true,
        }
    }
}

impl BucketConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !super::is_resource_name(&self.resource) {
            diag.error("bucket.resource", format!("invalid resource name `{}`", self.resource));
        }
        if self.public_read && !super::is_resource_name(&self.policy) {
            diag.error("bucket.policy", format!("invalid resource name `{}`", self.policy));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_bucket_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.bucket.resource, "s3-site-bucket");
        assert_eq!(config.bucket.policy, "bucketPolicy");
        assert!(config.bucket.public_read);
    }

    #[test]
    fn test_bucket_config_private() {
        let config = test_parse_config("[bucket]\npublic_read = false\npolicy = \"\"");
        let mut diag = crate::config::ConfigDiagnostics::new();
        config.bucket.validate(&mut diag);
        // policy name is irrelevant without a policy
        assert!(diag.is_empty());
    }
}
