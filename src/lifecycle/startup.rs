//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize telemetry for the selected stage
//! - Build the stage's state and routes from configuration
//! - Bind the listener and serve until shutdown
//! - Flush spans on the way out

use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ListenerConfig, ServiceConfig};
use crate::http::{enrichment, gateway, EnrichmentState, GatewayState, HttpServer};
use crate::lifecycle::shutdown::Shutdown;
use crate::observability::metrics::init_metrics;
use crate::observability::telemetry::{init_tracer_provider, recorder_for, TelemetryError};
use crate::observability::SpanRecorder;

/// Which half of the pipeline this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Gateway,
    Enrichment,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Gateway => gateway::STAGE,
            Stage::Enrichment => enrichment::STAGE,
        }
    }

    pub fn listener(self, config: &ServiceConfig) -> &ListenerConfig {
        match self {
            Stage::Gateway => &config.gateway.listener,
            Stage::Enrichment => &config.enrichment.listener,
        }
    }

    pub fn listener_mut(self, config: &mut ServiceConfig) -> &mut ListenerConfig {
        match self {
            Stage::Gateway => &mut config.gateway.listener,
            Stage::Enrichment => &mut config.enrichment.listener,
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("telemetry: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("metrics: {0}")]
    Metrics(#[from] BuildError),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),

    #[error("HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Assemble the server for `stage` without binding it.
pub fn build_server(
    stage: Stage,
    config: &ServiceConfig,
    recorder: Arc<dyn SpanRecorder>,
) -> Result<HttpServer, reqwest::Error> {
    let routes = match stage {
        Stage::Gateway => gateway::router(GatewayState::new(&config.gateway, recorder)?),
        Stage::Enrichment => enrichment::router(EnrichmentState::from_config(&config.enrichment, recorder)?),
    };
    Ok(HttpServer::new(stage.name(), routes, stage.listener(config)))
}

/// Run `stage` until `shutdown` fires. Logging must already be initialized.
pub async fn run_stage(stage: Stage, config: ServiceConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let provider = init_tracer_provider(stage.name(), config.observability.otlp_endpoint.as_deref())?;

    if let Some(addr) = &config.observability.metrics_address {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| StartupError::MetricsAddress(addr.clone()))?;
        init_metrics(addr)?;
    }

    let recorder: Arc<dyn SpanRecorder> = Arc::new(recorder_for(&provider, stage.name()));
    let server = build_server(stage, &config, recorder)?;

    let listener_config = stage.listener(&config);
    let listener = TcpListener::bind(&listener_config.bind_address).await?;
    tracing::info!(
        stage = stage.name(),
        address = %listener.local_addr()?,
        request_timeout_secs = listener_config.request_timeout_secs,
        "Listening for connections"
    );

    let served = server.run(listener, shutdown.subscribe()).await;

    if let Err(e) = provider.shutdown() {
        tracing::warn!(error = %e, "Tracer provider shutdown failed");
    }

    served?;
    Ok(())
}
