//! Composer trigger entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Wire observability**: configure `tracing-subscriber` with a JSON layer
//!    and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an OpenTelemetry OTLP
//!    exporter. Every `tracing` span and event in the workspace flows through it.
//! 2. **Read configuration**: listener settings once at start-up; trigger
//!    settings are re-read per delivery by the listener.
//! 3. **Construct infrastructure**: `GoogleDefaultCredentials` and
//!    `SystemResolver` from the `composer` crate, injected into the listener.
//! 4. **Serve**: accept Pub/Sub push deliveries until SIGTERM or Ctrl-C, then
//!    drain in-flight deliveries and flush telemetry.

mod telemetry;

use std::sync::Arc;

use anyhow::Context;
use composer::{GoogleDefaultCredentials, SystemResolver};
use listener::{AppState, ListenerConfig};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use trigger::TriggerConfig;

use crate::telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let telemetry =
        telemetry::init(&TelemetryConfig::from_env()).context("initialising telemetry")?;

    let result = run().await;
    if let Err(err) = &result {
        let chain = format!("{err:#}");
        error!(error = %chain, "composer-trigger stopped with an error");
    }

    telemetry.shutdown();
    result
}

async fn run() -> anyhow::Result<()> {
    let config = ListenerConfig::from_env().context("reading listener configuration")?;

    let trigger_config = TriggerConfig::from_env();
    info!(
        airflow_uri = %trigger_config.airflow_uri,
        dag_id = %trigger_config.dag_id,
        verbose = trigger_config.verbose,
        "trigger configuration at start-up"
    );
    if trigger_config.airflow_uri.is_empty() || trigger_config.dag_id.is_empty() {
        warn!("AIRFLOW_URI or DAG_ID is unset; deliveries will target an incomplete URL");
    }

    let http = composer::http_client()?;
    let state = AppState::new(
        Arc::new(GoogleDefaultCredentials::new(http)),
        Arc::new(SystemResolver),
        config.invocation_timeout,
    );

    let addr = config.bind_addr();
    let tcp = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(
        %addr,
        timeout_secs = config.invocation_timeout.as_secs(),
        "listening for Pub/Sub push deliveries"
    );

    listener::serve(tcp, state, shutdown_signal())
        .await
        .context("serving push endpoint")?;

    info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received; draining in-flight deliveries");
}
