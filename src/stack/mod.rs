//! Declarative stack: the fixed resource graph for a published site.
//!
//! # Resources
//!
//! ```text
//! s3-site-bucket ─┬─ obj-<key> × N        (bucket objects, one per upload)
//!                 ├─ bucketPolicy         (public read)
//!                 └─ s3Distribution ──┬── redirect_compressed_and_cache (edge function)
//!                                     └── cachePolicy
//! ```
//!
//! The stack is rendered as a Pulumi YAML program in JSON form. JSON is a
//! subset of YAML, so the document can be written straight to `Pulumi.yaml`
//! and handed to the orchestration engine, which owns provisioning and state.
//! References between resources use `${name.attribute}` interpolation.

mod bucket;
mod cdn;
mod function;

use anyhow::{Result, bail};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::fmt;

use crate::asset::AssetUpload;
use crate::config::SiteConfig;

/// Provider resource types used by the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceType {
    #[serde(rename = "aws:s3:Bucket")]
    Bucket,
    #[serde(rename = "aws:s3:BucketObject")]
    BucketObject,
    #[serde(rename = "aws:s3:BucketPolicy")]
    BucketPolicy,
    #[serde(rename = "aws:cloudfront:Function")]
    Function,
    #[serde(rename = "aws:cloudfront:CachePolicy")]
    CachePolicy,
    #[serde(rename = "aws:cloudfront:Distribution")]
    Distribution,
}

/// Output of another resource, resolved by the engine at deploy time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ref {
    resource: String,
    attribute: &'static str,
}

impl Ref {
    pub fn new(resource: impl Into<String>, attribute: &'static str) -> Self {
        Self {
            resource: resource.into(),
            attribute,
        }
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${{{}.{}}}", self.resource, self.attribute)
    }
}

impl Serialize for Ref {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single declared resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub name: String,
    pub kind: ResourceType,
    pub properties: Value,
}

impl Resource {
    fn new<P: Serialize>(name: impl Into<String>, kind: ResourceType, properties: &P) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            kind,
            properties: serde_json::to_value(properties)?,
        })
    }

    /// Property lookup by JSON pointer, e.g. `/website/indexDocument`.
    #[cfg(test)]
    pub fn property(&self, pointer: &str) -> Option<&Value> {
        self.properties.pointer(pointer)
    }
}

/// The full resource graph plus exported outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    pub name: String,
    pub resources: Vec<Resource>,
    pub outputs: Vec<(String, Ref)>,
}

impl Stack {
    #[cfg(test)]
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn count(&self, kind: ResourceType) -> usize {
        self.resources.iter().filter(|r| r.kind == kind).count()
    }

    /// Program document: `name`, `runtime`, `resources`, `outputs`.
    pub fn to_document(&self) -> Value {
        let resources: Map<String, Value> = self
            .resources
            .iter()
            .map(|r| {
                (
                    r.name.clone(),
                    json!({ "type": r.kind, "properties": r.properties }),
                )
            })
            .collect();

        let outputs: Map<String, Value> = self
            .outputs
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.to_string())))
            .collect();

        json!({
            "name": self.name,
            "runtime": "yaml",
            "resources": resources,
            "outputs": outputs,
        })
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let doc = self.to_document();
        let text = if pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        Ok(text)
    }
}

/// Declare the stack for a set of published uploads.
///
/// Resource order is declaration order: bucket, objects, policy, edge
/// function, cache policy, distribution. The engine derives the actual
/// creation order from the references.
pub fn declare(config: &SiteConfig, uploads: &[AssetUpload]) -> Result<Stack> {
    let bucket_name = config.bucket.resource.as_str();
    let mut resources = Vec::with_capacity(uploads.len() + 5);

    resources.push(bucket::bucket(config)?);
    for upload in uploads {
        resources.push(bucket::object(config, upload)?);
    }
    if config.bucket.public_read {
        resources.push(bucket::public_read_policy(config)?);
    }

    let edge = function::edge_function(config)?;
    let cache_policy = cdn::cache_policy(config)?;
    let distribution = cdn::distribution(config, &edge.name, &cache_policy.name)?;
    resources.extend([edge, cache_policy, distribution]);

    // Names become map keys in the document; a duplicate would replace a resource.
    let mut seen = HashSet::with_capacity(resources.len());
    for resource in &resources {
        if !seen.insert(resource.name.as_str()) {
            bail!("duplicate resource name `{}`", resource.name);
        }
    }

    Ok(Stack {
        name: config.site.name.clone(),
        resources,
        outputs: vec![
            ("bucketName".to_string(), Ref::new(bucket_name, "id")),
            ("websiteUrl".to_string(), Ref::new(bucket_name, "websiteEndpoint")),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::ContentEncoding;
    use std::path::PathBuf;

    fn upload(key: &str, content_type: &str, encoding: ContentEncoding) -> AssetUpload {
        AssetUpload {
            key: key.to_string(),
            source: PathBuf::from("/srv/site/www").join(key),
            content_type: content_type.to_string(),
            content_encoding: encoding,
        }
    }

    fn test_config() -> SiteConfig {
        SiteConfig {
            root: PathBuf::from("/srv/site"),
            ..SiteConfig::default()
        }
    }

    fn sample_uploads() -> Vec<AssetUpload> {
        vec![
            upload("index.html", "text/html", ContentEncoding::Identity),
            upload("index.html.gz", "text/html", ContentEncoding::Gzip),
            upload("css/style.css.br", "text/css", ContentEncoding::Brotli),
        ]
    }

    #[test]
    fn test_ref_display() {
        let r = Ref::new("s3-site-bucket", "id");
        assert_eq!(r.to_string(), "${s3-site-bucket.id}");
        assert_eq!(serde_json::to_value(&r).unwrap(), json!("${s3-site-bucket.id}"));
    }

    #[test]
    fn test_declare_resource_counts() {
        let uploads = sample_uploads();
        let stack = declare(&test_config(), &uploads).unwrap();

        assert_eq!(stack.resources.len(), 5 + uploads.len());
        assert_eq!(stack.count(ResourceType::Bucket), 1);
        assert_eq!(stack.count(ResourceType::BucketObject), 3);
        assert_eq!(stack.count(ResourceType::BucketPolicy), 1);
        assert_eq!(stack.count(ResourceType::Function), 1);
        assert_eq!(stack.count(ResourceType::CachePolicy), 1);
        assert_eq!(stack.count(ResourceType::Distribution), 1);
    }

    #[test]
    fn test_declare_without_policy() {
        let mut config = test_config();
        config.bucket.public_read = false;
        let stack = declare(&config, &[]).unwrap();

        assert_eq!(stack.resources.len(), 4);
        assert!(stack.resource("bucketPolicy").is_none());
    }

    #[test]
    fn test_declare_outputs() {
        let stack = declare(&test_config(), &[]).unwrap();
        let outputs: Vec<_> = stack
            .outputs
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_string()))
            .collect();

        assert_eq!(
            outputs,
            vec![
                ("bucketName", "${s3-site-bucket.id}".to_string()),
                ("websiteUrl", "${s3-site-bucket.websiteEndpoint}".to_string()),
            ]
        );
    }

    #[test]
    fn test_document_shape() {
        let stack = declare(&test_config(), &sample_uploads()).unwrap();
        let doc = stack.to_document();

        assert_eq!(doc["name"], "static-site");
        assert_eq!(doc["runtime"], "yaml");
        assert_eq!(doc["resources"]["s3-site-bucket"]["type"], "aws:s3:Bucket");
        assert_eq!(
            doc["resources"]["obj-index.html.gz"]["properties"]["contentEncoding"],
            "gzip"
        );
        assert_eq!(doc["outputs"]["bucketName"], "${s3-site-bucket.id}");

        // declaration order is preserved
        let names: Vec<_> = doc["resources"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(names.first().map(String::as_str), Some("s3-site-bucket"));
        assert_eq!(names.last().map(String::as_str), Some("s3Distribution"));
    }

    #[test]
    fn test_objects_named_like_fixed_resources() {
        let uploads: Vec<_> = [
            "s3-site-bucket",
            "bucketPolicy",
            "redirect_compressed_and_cache",
            "cachePolicy",
            "s3Distribution",
        ]
        .into_iter()
        .map(|key| upload(key, "", ContentEncoding::Identity))
        .collect();

        let stack = declare(&test_config(), &uploads).unwrap();
        let doc = stack.to_document();
        let resources = doc["resources"].as_object().unwrap();

        assert_eq!(resources.len(), stack.resources.len());
        assert_eq!(resources.len(), 5 + uploads.len());
        assert_eq!(resources["s3-site-bucket"]["type"], "aws:s3:Bucket");
        assert_eq!(resources["cachePolicy"]["type"], "aws:cloudfront:CachePolicy");
        assert_eq!(resources["obj-cachePolicy"]["properties"]["key"], "cachePolicy");
    }

    #[test]
    fn test_duplicate_resource_names_rejected() {
        let mut config = test_config();
        config.cdn.cache_policy.resource = "obj-index.html".to_string();
        let uploads = [upload("index.html", "text/html", ContentEncoding::Identity)];

        let err = declare(&config, &uploads).unwrap_err();
        assert!(err.to_string().contains("obj-index.html"));
    }

    #[test]
    fn test_to_json_round_trips_as_value() {
        let stack = declare(&test_config(), &sample_uploads()).unwrap();
        let text = stack.to_json(true).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, stack.to_document());
    }
}
