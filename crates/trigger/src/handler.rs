//! The DAG trigger handler.
//!
//! One call to [`trigger_dag`] is one invocation: build the target URL,
//! optionally log diagnostics, obtain a credentialed client, POST the wrapped
//! payload, and log the response body. The remote status code does not decide
//! the result; only failing to obtain credentials, to send, or to read the
//! body does.

use std::ffi::OsString;
use std::future::Future;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::{
    dump_context, dump_dns, dump_environment, ClientError, ClientProvider, HostResolver,
    InvocationContext, PubSubMessage, TriggerConfig, TriggerError, TriggerOutcome, TriggerRequest,
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Consumes a Pub/Sub message, triggering a DAG run with the message payload
/// as its `conf.data`.
///
/// When `ctx` carries a deadline, every wait is bound to it. Expiry while
/// obtaining credentials fails the invocation as a credential error; expiry
/// while sending or reading the response fails it as a transport error. The
/// verbose DNS lookup is abandoned with a warning.
#[instrument(
    skip_all,
    fields(invocation_id = %ctx.invocation_id(), dag_id = %config.dag_id)
)]
pub async fn trigger_dag(
    ctx: &InvocationContext,
    message: &PubSubMessage,
    config: &TriggerConfig,
    provider: &dyn ClientProvider,
    resolver: &dyn HostResolver,
) -> Result<TriggerOutcome, TriggerError> {
    let target_url = config.target_url();

    if config.verbose {
        let vars: Vec<(OsString, OsString)> = std::env::vars_os().collect();
        info!("Environment Variables: {}", dump_environment(vars));
        dump_context(ctx, false);
        info!("PubSubMessage: {:?}", message.data);
        info!("Target URL: {target_url}");
        let lookup = dump_dns(&config.airflow_uri, resolver);
        if within_deadline(ctx.deadline(), lookup).await.is_none() {
            warn!("Could not get IPs: invocation deadline exceeded");
        }
    }

    let client = within_deadline(ctx.deadline(), provider.default_client())
        .await
        .unwrap_or_else(|| Err(deadline_exceeded()))
        .map_err(TriggerError::Credentials)?;

    let body = TriggerRequest::wrap(&message.data).to_body().map_err(|err| {
        TriggerError::Transport(ClientError::with_source("encoding request body", err))
    })?;
    debug!(bytes = body.len(), "posting DAG run request");

    let exchange = async {
        let mut response = client
            .post(&target_url, JSON_CONTENT_TYPE, body)
            .await
            .map_err(TriggerError::Transport)?;
        let status = response.status();
        let bytes = response.read_body().await.map_err(TriggerError::ReadBody)?;
        Ok::<_, TriggerError>((status, bytes))
    };

    let (status, bytes) = within_deadline(ctx.deadline(), exchange)
        .await
        .unwrap_or_else(|| Err(TriggerError::Transport(deadline_exceeded())))?;

    let body = String::from_utf8_lossy(&bytes).into_owned();
    info!(status, "Response: {body}");

    let outcome = TriggerOutcome { status, body };
    if !outcome.is_success_status() {
        warn!(status, "Airflow answered with a non-success status");
    }
    Ok(outcome)
}

/// Runs `fut` to completion, or returns `None` once `deadline` passes.
async fn within_deadline<F: Future>(deadline: Option<Instant>, fut: F) -> Option<F::Output> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline.into(), fut).await.ok(),
        None => Some(fut.await),
    }
}

fn deadline_exceeded() -> ClientError {
    ClientError::msg("invocation deadline exceeded")
}
