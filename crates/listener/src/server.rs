//! HTTP endpoint for Pub/Sub push deliveries.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info, info_span, warn, Instrument};
use trigger::{trigger_dag, ClientProvider, HostResolver, InvocationContext, TriggerConfig};

use crate::PushEnvelope;

type ConfigSource = Arc<dyn Fn() -> TriggerConfig + Send + Sync>;

/// Shared handles for every delivery.
#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn ClientProvider>,
    resolver: Arc<dyn HostResolver>,
    invocation_timeout: Duration,
    config: ConfigSource,
}

impl AppState {
    /// Creates the state. Trigger configuration is re-read from the process
    /// environment for every delivery.
    pub fn new(
        provider: Arc<dyn ClientProvider>,
        resolver: Arc<dyn HostResolver>,
        invocation_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            resolver,
            invocation_timeout,
            config: Arc::new(TriggerConfig::from_env),
        }
    }

    /// Replaces the per-delivery configuration source.
    pub fn with_config_source<F>(mut self, source: F) -> Self
    where
        F: Fn() -> TriggerConfig + Send + Sync + 'static,
    {
        self.config = Arc::new(source);
        self
    }
}

/// Builds the push endpoint router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(receive_push))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Serves [`router`] on `listener` until `shutdown` resolves. In-flight
/// deliveries finish before this returns.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn healthz() -> &'static str {
    "ok"
}

async fn receive_push(State(state): State<AppState>, body: Bytes) -> StatusCode {
    let (message, event) = match PushEnvelope::decode(&body) {
        Ok(parts) => parts,
        Err(err) => {
            warn!(error = %err, "rejecting malformed push delivery");
            return StatusCode::BAD_REQUEST;
        }
    };

    let ctx = InvocationContext::new()
        .with_deadline(Instant::now() + state.invocation_timeout)
        .with_event(event);
    let span = info_span!(
        "pubsub_delivery",
        invocation_id = %ctx.invocation_id(),
        message_id = message.message_id.as_ref().map(|id| id.as_str()).unwrap_or(""),
    );
    let config = (state.config)();

    async move {
        let result = trigger_dag(
            &ctx,
            &message,
            &config,
            state.provider.as_ref(),
            state.resolver.as_ref(),
        )
        .await;

        match result {
            Ok(outcome) => {
                info!(status = outcome.status, "DAG run requested");
                StatusCode::NO_CONTENT
            }
            Err(err) => {
                error!(
                    error = %err,
                    stage = err.stage(),
                    retry = ?err.retry_policy(),
                    "trigger failed; delivery will be retried"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
    .instrument(span)
    .await
}
