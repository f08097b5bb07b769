//! Cloud Composer infrastructure adapter.
//!
//! Implements the [`trigger`] port traits against Google Cloud:
//!
//! - [`GoogleDefaultCredentials`]: [`trigger::ClientProvider`] backed by
//!   Application Default Credentials (a gcloud `authorized_user` file, a
//!   `service_account` key file, or the GCE / Cloud Run metadata server).
//! - [`AuthorizedClient`]: [`trigger::CredentialedHttpClient`] over a shared
//!   `reqwest` client, attaching the access token as a bearer token.
//! - [`SystemResolver`]: [`trigger::HostResolver`] over the system resolver.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** OAuth token exchange, metadata server access, HTTP
//! transport and DNS live here. The [`trigger`] crate sees only its ports.

pub mod client;
pub mod credentials;
pub mod resolver;

pub use client::{http_client, AuthorizedClient, ReqwestResponse};
pub use credentials::{AccessToken, CredentialSource, GoogleDefaultCredentials, ServiceAccountKey};
pub use resolver::SystemResolver;
