//! DNS resolution through the operating system resolver.

use std::net::IpAddr;

use async_trait::async_trait;
use trigger::{ClientError, HostResolver};

/// [`HostResolver`] backed by `getaddrinfo` via `tokio::net::lookup_host`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl HostResolver for SystemResolver {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, ClientError> {
        let addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|err| ClientError::with_source(format!("resolving {host}"), err))?;

        // getaddrinfo returns one entry per socket type; keep each address once.
        let mut ips: Vec<IpAddr> = Vec::new();
        for addr in addrs {
            if !ips.contains(&addr.ip()) {
                ips.push(addr.ip());
            }
        }
        Ok(ips)
    }
}
