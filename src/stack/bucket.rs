//! Bucket, bucket objects and the public-read policy.

use anyhow::Result;
use serde::Serialize;

use super::{Ref, Resource, ResourceType};
use crate::asset::{AssetUpload, ContentEncoding};
use crate::config::SiteConfig;
use crate::utils::path::to_slash;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BucketArgs<'a> {
    website: WebsiteArgs<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WebsiteArgs<'a> {
    index_document: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BucketObjectArgs<'a> {
    bucket: Ref,
    key: &'a str,
    source: FileAsset,
    content_type: &'a str,
    content_encoding: ContentEncoding,
}

/// File read by the engine at deploy time.
#[derive(Serialize)]
struct FileAsset {
    #[serde(rename = "fn::fileAsset")]
    path: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BucketPolicyArgs {
    bucket: Ref,
    policy: ToJson<PolicyDocument>,
}

/// Value the engine serializes to a JSON string after resolving references.
#[derive(Serialize)]
struct ToJson<T> {
    #[serde(rename = "fn::toJSON")]
    value: T,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PolicyDocument {
    version: &'static str,
    statement: Vec<PolicyStatement>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PolicyStatement {
    effect: &'static str,
    principal: &'static str,
    action: Vec<&'static str>,
    resource: Vec<String>,
}

/// Bucket configured for static website hosting.
pub fn bucket(config: &SiteConfig) -> Result<Resource> {
    let args = BucketArgs {
        website: WebsiteArgs {
            index_document: &config.site.index,
        },
    };
    Resource::new(&config.bucket.resource, ResourceType::Bucket, &args)
}

/// Prefix keeping object resource names apart from the fixed resources.
const OBJECT_PREFIX: &str = "obj-";

/// One object per upload record, named `obj-<key>` with the key set explicitly.
pub fn object(config: &SiteConfig, upload: &AssetUpload) -> Result<Resource> {
    let args = BucketObjectArgs {
        bucket: Ref::new(&config.bucket.resource, "id"),
        key: &upload.key,
        source: FileAsset {
            path: to_slash(&config.root_relative(&upload.source)),
        },
        content_type: &upload.content_type,
        content_encoding: upload.content_encoding,
    };
    Resource::new(
        format!("{OBJECT_PREFIX}{}", upload.key),
        ResourceType::BucketObject,
        &args,
    )
}

/// Anonymous `s3:GetObject` on every object in the bucket.
pub fn public_read_policy(config: &SiteConfig) -> Result<Resource> {
    let bucket = Ref::new(&config.bucket.resource, "id");
    let args = BucketPolicyArgs {
        policy: ToJson {
            value: PolicyDocument {
                version: "2012-10-17",
                statement: vec![PolicyStatement {
                    effect: "Allow",
                    principal: "*",
                    action: vec!["s3:GetObject"],
                    resource: vec![format!("arn:aws:s3:::{bucket}/*")],
                }],
            },
        },
        bucket,
    };
    Resource::new(&config.bucket.policy, ResourceType::BucketPolicy, &args)
}
