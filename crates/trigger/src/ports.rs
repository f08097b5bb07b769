//! Port traits implemented by infrastructure crates.
//!
//! The handler only ever talks to these traits. The `composer` crate supplies
//! Google ambient credentials, a `reqwest` client and a system DNS resolver;
//! tests supply in-memory fakes.

use std::net::IpAddr;

use async_trait::async_trait;

use crate::ClientError;

/// Produces HTTP clients that carry the hosting environment's default
/// credentials.
#[async_trait]
pub trait ClientProvider: Send + Sync {
    /// Resolves the ambient credentials and returns a client authorised with them.
    ///
    /// Called once per invocation; implementations must not cache a client
    /// across invocations beyond what their own credential lifetime allows.
    async fn default_client(&self) -> Result<Box<dyn CredentialedHttpClient>, ClientError>;
}

/// An HTTP client whose requests are authorised for the target service.
#[async_trait]
pub trait CredentialedHttpClient: Send + Sync {
    /// Sends `body` to `url` as a `POST` with the given `Content-Type`.
    ///
    /// Returns once response headers have arrived. An error means no response
    /// was received.
    async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<Box<dyn HttpResponse>, ClientError>;
}

/// A received HTTP response whose body has not been read yet.
///
/// Dropping the response releases its connection.
#[async_trait]
pub trait HttpResponse: Send {
    /// HTTP status code.
    fn status(&self) -> u16;

    /// Reads the full response body.
    ///
    /// The body can be read once; later calls return an error.
    async fn read_body(&mut self) -> Result<Vec<u8>, ClientError>;
}

/// Resolves host names to IP addresses.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Returns every address `host` resolves to, in resolution order.
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, ClientError>;
}
