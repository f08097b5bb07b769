//! Listener process configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use trigger::ConfigError;

const PORT_VAR: &str = "PORT";
const TIMEOUT_VAR: &str = "FUNCTION_TIMEOUT_SEC";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// TCP port to listen on (`PORT`, default `8080`).
    pub port: u16,
    /// Deadline applied to each delivery (`FUNCTION_TIMEOUT_SEC`, default `60`).
    pub invocation_timeout: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            invocation_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ListenerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(PORT_VAR).filter(|v| !v.trim().is_empty()) {
            config.port = raw.trim().parse().map_err(|err: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: PORT_VAR,
                    value: raw.clone(),
                    reason: err.to_string(),
                }
            })?;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|err: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: TIMEOUT_VAR,
                    value: raw.clone(),
                    reason: err.to_string(),
                }
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    name: TIMEOUT_VAR,
                    value: raw,
                    reason: "must be at least one second".to_string(),
                });
            }
            config.invocation_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Address to bind: all interfaces on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
