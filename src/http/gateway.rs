//! Gateway stage: validate, forward, relay.
//!
//! ```text
//! POST / {"cep"}
//!     → extract inbound trace context (if any)
//!     → decode → validate (span: validate-cep)
//!     → POST {enrichment_url}/weather with traceparent + x-request-id
//!       (span: call-enrichment-service, hard timeout)
//!     → relay downstream status + JSON body
//! ```
//!
//! Dropping the handler future (client disconnect, inbound timeout) drops
//! the in-flight outbound call with it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use opentelemetry::trace::SpanKind;
use opentelemetry::KeyValue;
use reqwest::Client;

use crate::config::GatewayConfig;
use crate::domain::{Cep, Phase};
use crate::http::error::{method_not_allowed, StageError};
use crate::http::request::{decode_lookup, request_id, X_REQUEST_ID};
use crate::http::response::{health, relay_json};
use crate::observability::{extract_context, inject_context, metrics, SpanRecorder, SpanScope};

pub const STAGE: &str = "gateway";

/// Path appended to the enrichment base URL.
pub const ENRICHMENT_PATH: &str = "/weather";

/// State injected into the gateway handlers.
#[derive(Clone)]
pub struct GatewayState {
    client: Client,
    weather_endpoint: String,
    recorder: Arc<dyn SpanRecorder>,
}

impl GatewayState {
    pub fn new(config: &GatewayConfig, recorder: Arc<dyn SpanRecorder>) -> reqwest::Result<Self> {
        let client = crate::providers::build_client(Duration::from_secs(config.enrichment_timeout_secs))?;
        Ok(Self::with_client(client, &config.enrichment_url, recorder))
    }

    pub fn with_client(client: Client, enrichment_url: &str, recorder: Arc<dyn SpanRecorder>) -> Self {
        Self {
            client,
            weather_endpoint: format!("{}{}", enrichment_url.trim_end_matches('/'), ENRICHMENT_PATH),
            recorder,
        }
    }
}

/// Routes of the gateway stage.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", post(lookup_handler).fallback(method_not_allowed))
        .route("/health", get(|| async { health(STAGE) }))
        .with_state(state)
}

async fn lookup_handler(State(state): State<GatewayState>, headers: HeaderMap, body: Bytes) -> Response {
    let start_time = Instant::now();
    let parent = extract_context(&headers);
    let span = state.recorder.start("handle-cep-request", SpanKind::Server, &parent);

    let response = match forward(&state, &span, &headers, &body).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(
                request_id = %request_id(&headers),
                status = %e.status(),
                phase = %e.phase(),
                error = %e,
                "Lookup rejected"
            );
            span.record_error(&e);
            span.set_attribute(KeyValue::new("cep.failed_after", e.phase().as_str()));
            metrics::record_failure(STAGE, e.phase());
            e.into_response()
        }
    };

    span.set_attribute(KeyValue::new("http.response.status_code", i64::from(response.status().as_u16())));
    metrics::record_request(STAGE, response.status().as_u16(), start_time);
    response
}

async fn forward(
    state: &GatewayState,
    span: &SpanScope,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Response, StageError> {
    let request = decode_lookup(body)?;

    {
        let validate_span = state.recorder.start("validate-cep", SpanKind::Internal, span.context());
        if let Err(e) = Cep::parse(&request.code) {
            validate_span.record_error(&e);
            return Err(e.into());
        }
    }

    let call_span = state
        .recorder
        .start("call-enrichment-service", SpanKind::Client, span.context());

    let mut outbound = HeaderMap::new();
    inject_context(call_span.context(), &mut outbound);
    if let Some(id) = headers.get(X_REQUEST_ID) {
        outbound.insert(X_REQUEST_ID, id.clone());
    }

    tracing::debug!(
        request_id = %request_id(headers),
        cep = %request.code,
        endpoint = %state.weather_endpoint,
        phase = %Phase::DownstreamCall,
        "Forwarding to enrichment stage"
    );

    let downstream = state
        .client
        .post(&state.weather_endpoint)
        .headers(outbound)
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            call_span.record_error(&e);
            StageError::EnrichmentUnreachable(e)
        })?;

    let status = downstream.status();
    let body = downstream.bytes().await.map_err(|e| {
        call_span.record_error(&e);
        StageError::EnrichmentUnreachable(e)
    })?;

    tracing::debug!(
        request_id = %request_id(headers),
        status = %status,
        phase = %Phase::Responded,
        "Relaying enrichment response"
    );
    Ok(relay_json(status, &body))
}
