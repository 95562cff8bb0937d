//! Server lifecycle: binding and Ctrl+C shutdown.

use crate::log;
use anyhow::Result;
use std::{
    net::{IpAddr, SocketAddr},
    sync::{Arc, OnceLock},
};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Server to unblock on Ctrl+C, set once bound.
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Bind to `interface`, trying `base_port` and the next nine ports.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Install the Ctrl+C handler. Call once at program start.
///
/// Before a server is registered the process exits right away; afterwards
/// the request loop is unblocked and `serve` returns normally.
pub fn setup_shutdown_handler() -> Result<()> {
    ctrlc::set_handler(|| match SERVER.get() {
        Some(server) => {
            log!("serve"; "shutting down...");
            server.unblock();
        }
        None => std::process::exit(0),
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the bound server for graceful shutdown.
pub fn register_server(server: Arc<Server>) {
    let _ = SERVER.set(server);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_bind_skips_used_port() {
        let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let (first, addr) = bind_with_retry(localhost, 0).unwrap();
        let port = first.server_addr().to_ip().map(|a| a.port()).unwrap();

        // Port taken by `first`, so the next one is used.
        let (_second, second_addr) = bind_with_retry(localhost, port).unwrap();
        assert_ne!(second_addr.port(), port);
        assert_eq!(addr.port(), 0);
    }
}
