//! Verbose diagnostics: environment dump and DNS lookup of the target host.
//!
//! Both routines only observe. Failures are logged and swallowed; nothing here
//! can change the outcome of an invocation.

use std::ffi::OsString;

use tracing::{info, warn};
use url::{Host, Url};

use crate::HostResolver;

/// Substrings that mark an environment variable as secret.
const SECRET_MARKERS: [&str; 4] = ["TOKEN", "SECRET", "PASSWORD", "KEY"];

/// Renders environment variables as `[KEY=VALUE ...]`, masking secret values.
pub fn dump_environment<I>(vars: I) -> String
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let pairs: Vec<String> = vars
        .into_iter()
        .map(|(key, value)| {
            let key = key.to_string_lossy();
            let upper = key.to_ascii_uppercase();
            if SECRET_MARKERS.iter().any(|marker| upper.contains(marker)) {
                format!("{key}=***")
            } else {
                format!("{key}={}", value.to_string_lossy())
            }
        })
        .collect();
    format!("[{}]", pairs.join(" "))
}

/// Resolves the host of `uri` and logs one `<host> IN A <ip>` line per address.
///
/// Returns the logged address lines; empty when the URI could not be parsed or
/// the host could not be resolved.
///
/// `uri` must be absolute. A bare host such as `airflow.example.com` has no
/// scheme, is reported as `Could not parse URL` and is never looked up.
pub async fn dump_dns(uri: &str, resolver: &dyn HostResolver) -> Vec<String> {
    let hostname = match host_of(uri) {
        Ok(hostname) => hostname,
        Err(reason) => {
            warn!("Could not parse URL: {reason}");
            return Vec::new();
        }
    };

    let ips = match resolver.lookup_ip(&hostname).await {
        Ok(ips) => ips,
        Err(err) => {
            warn!("Could not get IPs: {err}");
            return Vec::new();
        }
    };

    ips.into_iter()
        .map(|ip| {
            let line = format!("{hostname} IN A {ip}");
            info!("{line}");
            line
        })
        .collect()
}

fn host_of(uri: &str) -> Result<String, String> {
    let parsed = Url::parse(uri).map_err(|err| format!("{err} ({uri:?})"))?;
    match parsed.host() {
        Some(Host::Domain(domain)) => Ok(domain.to_string()),
        Some(Host::Ipv4(ip)) => Ok(ip.to_string()),
        Some(Host::Ipv6(ip)) => Ok(ip.to_string()),
        None => Err(format!("no host in {uri:?}")),
    }
}
