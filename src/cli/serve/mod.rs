//! Local preview server.
//!
//! Publishes once at startup, then answers each request the way the
//! distribution would: apply the edge rewrite, look the key up among the
//! published objects and return its bytes with the stored metadata.

mod lifecycle;
mod path;
mod response;

pub use lifecycle::setup_shutdown_handler;

use crate::{
    asset::AssetUpload,
    config::SiteConfig,
    debug,
    edge::rewrite_uri,
    log,
    utils::plural_count,
};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tiny_http::{Method, Request, Server};

/// Published objects by key.
type ObjectMap = HashMap<String, AssetUpload>;

/// Shared, read-only state of the request handlers.
struct Site {
    objects: ObjectMap,
    index: String,
}

pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let uploads = super::publish::collect(config)?;
    log!("publish"; "{}", super::publish::summary(config, &uploads));

    let site = Arc::new(Site {
        objects: uploads.into_iter().map(|u| (u.key.clone(), u)).collect(),
        index: config.site.index.clone(),
    });

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    run_request_loop(&server, &site)
}

fn run_request_loop(server: &Server, site: &Arc<Site>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .context("failed to create thread pool")?;

    for request in server.incoming_requests() {
        let site = Arc::clone(site);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &site) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    debug!("serve"; "{} stopped", plural_count(site.objects.len(), "object"));
    Ok(())
}

fn handle_request(request: Request, site: &Site) -> Result<()> {
    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    let Some(uri) = path::request_uri(request.url()) else {
        return response::respond_bad_request(request);
    };

    let accept = accept_encoding(&request);
    let rewritten = rewrite_uri(&uri, accept.as_deref(), &site.index);
    let key = rewritten.trim_start_matches('/');

    match site.objects.get(key) {
        Some(upload) => {
            debug!("serve"; "{} {} -> {}", request.method(), uri, key);
            response::respond_object(request, upload)
        }
        None => {
            debug!("serve"; "{} {} -> {} (missing)", request.method(), uri, key);
            response::respond_not_found(request, &uri, key)
        }
    }
}

/// `Accept-Encoding` request header, if present.
fn accept_encoding(request: &Request) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Accept-Encoding"))
        .map(|h| h.value.to_string())
}
