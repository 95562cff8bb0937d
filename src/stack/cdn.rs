//! Cache policy and distribution.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{Ref, Resource, ResourceType};
use crate::config::SiteConfig;
use crate::config::section::{PriceClass, RestrictionType, ViewerProtocolPolicy};

/// Methods the distribution accepts and caches. The site is read-only.
const METHODS: [&str; 2] = ["GET", "HEAD"];

// ============================================================================
// cache policy
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CachePolicyArgs<'a> {
    comment: &'a str,
    name: &'a str,
    default_ttl: u64,
    max_ttl: u64,
    min_ttl: u64,
    parameters_in_cache_key_and_forwarded_to_origin: CacheKeyParameters<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheKeyParameters<'a> {
    cookies_config: CookiesConfig,
    enable_accept_encoding_brotli: bool,
    enable_accept_encoding_gzip: bool,
    headers_config: HeadersConfig<'a>,
    query_strings_config: QueryStringsConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CookiesConfig {
    cookie_behavior: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HeadersConfig<'a> {
    header_behavior: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<Items<'a>>,
}

#[derive(Serialize)]
struct Items<'a> {
    items: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryStringsConfig {
    query_string_behavior: &'static str,
}

/// Cache policy keyed on the configured request headers only.
///
/// Built-in brotli/gzip normalization stays off: the edge function already
/// picks the variant, and `Accept-Encoding` in the key keeps variants apart.
pub fn cache_policy(config: &SiteConfig) -> Result<Resource> {
    let cdn = &config.cdn;
    let headers = &cdn.cache_policy.headers;

    let headers_config = if headers.is_empty() {
        HeadersConfig {
            header_behavior: "none",
            headers: None,
        }
    } else {
        HeadersConfig {
            header_behavior: "whitelist",
            headers: Some(Items { items: headers }),
        }
    };

    let args = CachePolicyArgs {
        comment: &cdn.cache_policy.comment,
        name: &cdn.cache_policy.name,
        default_ttl: cdn.ttl.default,
        max_ttl: cdn.ttl.max,
        min_ttl: cdn.ttl.min,
        parameters_in_cache_key_and_forwarded_to_origin: CacheKeyParameters {
            cookies_config: CookiesConfig {
                cookie_behavior: "none",
            },
            enable_accept_encoding_brotli: false,
            enable_accept_encoding_gzip: false,
            headers_config,
            query_strings_config: QueryStringsConfig {
                query_string_behavior: "none",
            },
        },
    };
    Resource::new(&cdn.cache_policy.resource, ResourceType::CachePolicy, &args)
}

// ============================================================================
// distribution
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DistributionArgs<'a> {
    origins: Vec<Origin<'a>>,
    enabled: bool,
    is_ipv6_enabled: bool,
    comment: &'a str,
    default_root_object: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    aliases: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    logging_config: Option<LoggingArgs<'a>>,
    default_cache_behavior: DefaultCacheBehavior<'a>,
    price_class: PriceClass,
    restrictions: Restrictions<'a>,
    tags: &'a BTreeMap<String, String>,
    viewer_certificate: ViewerCertificate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Origin<'a> {
    domain_name: Ref,
    origin_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoggingArgs<'a> {
    include_cookies: bool,
    bucket: &'a str,
    prefix: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DefaultCacheBehavior<'a> {
    allowed_methods: [&'static str; 2],
    cached_methods: [&'static str; 2],
    function_associations: Vec<FunctionAssociation>,
    cache_policy_id: Ref,
    target_origin_id: &'a str,
    viewer_protocol_policy: ViewerProtocolPolicy,
    min_ttl: u64,
    default_ttl: u64,
    max_ttl: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FunctionAssociation {
    function_arn: Ref,
    event_type: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Restrictions<'a> {
    geo_restriction: GeoRestriction<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeoRestriction<'a> {
    restriction_type: RestrictionType,
    locations: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewerCertificate {
    cloudfront_default_certificate: bool,
}

/// Distribution with the bucket as its only origin.
///
/// `function` and `cache_policy` are the logical names of the resources
/// the default behavior references.
pub fn distribution(config: &SiteConfig, function: &str, cache_policy: &str) -> Result<Resource> {
    let cdn = &config.cdn;

    let logging_config = cdn.logging.enable.then(|| LoggingArgs {
        include_cookies: cdn.logging.include_cookies,
        bucket: &cdn.logging.bucket,
        prefix: &cdn.logging.prefix,
    });

    let args = DistributionArgs {
        origins: vec![Origin {
            domain_name: Ref::new(&config.bucket.resource, "bucketDomainName"),
            origin_id: &cdn.origin_id,
        }],
        enabled: cdn.enabled,
        is_ipv6_enabled: cdn.ipv6,
        comment: &cdn.comment,
        default_root_object: &config.site.index,
        aliases: &cdn.aliases,
        logging_config,
        default_cache_behavior: DefaultCacheBehavior {
            allowed_methods: METHODS,
            cached_methods: METHODS,
            function_associations: vec![FunctionAssociation {
                function_arn: Ref::new(function, "arn"),
                event_type: config.function.event.as_str(),
            }],
            cache_policy_id: Ref::new(cache_policy, "id"),
            target_origin_id: &cdn.origin_id,
            viewer_protocol_policy: cdn.viewer_protocol_policy,
            min_ttl: cdn.ttl.min,
            default_ttl: cdn.ttl.default,
            max_ttl: cdn.ttl.max,
        },
        price_class: cdn.price_class,
        restrictions: Restrictions {
            geo_restriction: GeoRestriction {
                restriction_type: cdn.geo.restriction,
                locations: &cdn.geo.locations,
            },
        },
        tags: &cdn.tags,
        viewer_certificate: ViewerCertificate {
            cloudfront_default_certificate: true,
        },
    };
    Resource::new(&cdn.resource, ResourceType::Distribution, &args)
}
