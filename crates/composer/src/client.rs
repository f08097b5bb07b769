//! Credentialed HTTP client for the Airflow REST API.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use trigger::{ClientError, CredentialedHttpClient, HttpResponse};

use crate::AccessToken;

const USER_AGENT: &str = concat!("composer-trigger/", env!("CARGO_PKG_VERSION"));

/// Builds the `reqwest` client shared by credential lookups and Airflow calls.
///
/// No request timeout is set here; each invocation bounds its own call with
/// its deadline.
pub fn http_client() -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|err| ClientError::with_source("building HTTP client", err))
}

/// A `reqwest` client that sends every request with a bearer token.
pub struct AuthorizedClient {
    http: reqwest::Client,
    token: AccessToken,
}

impl AuthorizedClient {
    pub fn new(http: reqwest::Client, token: AccessToken) -> Self {
        Self { http, token }
    }
}

#[async_trait]
impl CredentialedHttpClient for AuthorizedClient {
    async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<Box<dyn HttpResponse>, ClientError> {
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .bearer_auth(self.token.secret())
            .body(body)
            .send()
            .await
            .map_err(|err| ClientError::with_source(format!("POST {url}"), err))?;

        Ok(Box::new(ReqwestResponse::new(response)))
    }
}

/// [`HttpResponse`] over a `reqwest::Response`.
pub struct ReqwestResponse {
    status: u16,
    inner: Option<reqwest::Response>,
}

impl ReqwestResponse {
    pub fn new(response: reqwest::Response) -> Self {
        Self {
            status: response.status().as_u16(),
            inner: Some(response),
        }
    }
}

#[async_trait]
impl HttpResponse for ReqwestResponse {
    fn status(&self) -> u16 {
        self.status
    }

    async fn read_body(&mut self) -> Result<Vec<u8>, ClientError> {
        let response = self
            .inner
            .take()
            .ok_or_else(|| ClientError::msg("response body already consumed"))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ClientError::with_source("reading response body", err))?;
        Ok(bytes.to_vec())
    }
}
