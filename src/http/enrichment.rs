//! Enrichment stage: resolve the postal code, attach the temperature.
//!
//! ```text
//! POST /weather {"cep"}   (traceparent from the gateway)
//!     → extract trace context; every span below is its child
//!     → decode → validate again (span: validate-cep)
//!     → directory lookup (span: fetch-cep-data)      miss/any failure → 404
//!     → weather lookup (span: fetch-weather-data)    failure → 500
//!     → °C → °F / K, one decimal → 200 {"city","temp_C","temp_F","temp_K"}
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use opentelemetry::trace::SpanKind;
use opentelemetry::KeyValue;

use crate::config::EnrichmentConfig;
use crate::domain::{Cep, EnrichedResponse, Phase};
use crate::http::error::{method_not_allowed, StageError};
use crate::http::request::{decode_lookup, request_id};
use crate::http::response::health;
use crate::observability::{extract_context, metrics, SpanRecorder, SpanScope};
use crate::providers::{build_client, weather_provider, DirectoryLookup, ViaCepDirectory, WeatherProvider};

pub const STAGE: &str = "enrichment";

/// State injected into the enrichment handlers.
#[derive(Clone)]
pub struct EnrichmentState {
    directory: Arc<dyn DirectoryLookup>,
    weather: Arc<dyn WeatherProvider>,
    recorder: Arc<dyn SpanRecorder>,
}

impl EnrichmentState {
    pub fn new(
        directory: Arc<dyn DirectoryLookup>,
        weather: Arc<dyn WeatherProvider>,
        recorder: Arc<dyn SpanRecorder>,
    ) -> Self {
        Self {
            directory,
            weather,
            recorder,
        }
    }

    /// Wire the HTTP collaborators described by `config`.
    pub fn from_config(config: &EnrichmentConfig, recorder: Arc<dyn SpanRecorder>) -> reqwest::Result<Self> {
        let client = build_client(Duration::from_secs(config.upstream_timeout_secs))?;
        let directory = Arc::new(ViaCepDirectory::new(client.clone(), &config.directory_url));
        let weather = weather_provider(config, client);
        tracing::info!(
            directory_url = %config.directory_url,
            weather = weather.name(),
            "Enrichment collaborators ready"
        );
        Ok(Self::new(directory, weather, recorder))
    }
}

/// Routes of the enrichment stage.
pub fn router(state: EnrichmentState) -> Router {
    Router::new()
        .route("/weather", post(weather_handler).fallback(method_not_allowed))
        .route("/health", get(|| async { health(STAGE) }))
        .with_state(state)
}

async fn weather_handler(State(state): State<EnrichmentState>, headers: HeaderMap, body: Bytes) -> Response {
    let start_time = Instant::now();
    let parent = extract_context(&headers);
    let span = state.recorder.start("handle-weather-request", SpanKind::Server, &parent);

    let response = match enrich(&state, &span, &body).await {
        Ok(enriched) => {
            tracing::info!(
                request_id = %request_id(&headers),
                city = %enriched.locality,
                temp_c = enriched.temp_c,
                phase = %Phase::Responded,
                "Lookup enriched"
            );
            (StatusCode::OK, Json(enriched)).into_response()
        }
        Err(e) => {
            tracing::warn!(
                request_id = %request_id(&headers),
                status = %e.status(),
                phase = %e.phase(),
                error = %e,
                "Lookup failed"
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

async fn enrich(state: &EnrichmentState, span: &SpanScope, body: &[u8]) -> Result<EnrichedResponse, StageError> {
    let request = decode_lookup(body)?;

    // The gateway already checked the format; this stage does not rely on it.
    let cep = {
        let validate_span = state.recorder.start("validate-cep", SpanKind::Internal, span.context());
        Cep::parse(&request.code).inspect_err(|e| validate_span.record_error(e))?
    };

    let record = {
        let lookup_span = state.recorder.start("fetch-cep-data", SpanKind::Client, span.context());
        lookup_span.set_attribute(KeyValue::new("cep.code", cep.to_string()));
        state
            .directory
            .lookup(&cep, lookup_span.context())
            .await
            .map_err(|e| {
                lookup_span.record_error(&e);
                StageError::NotFound(e)
            })?
    };

    let sample = {
        let weather_span = state.recorder.start("fetch-weather-data", SpanKind::Client, span.context());
        weather_span.set_attribute(KeyValue::new("weather.provider", state.weather.name()));
        state
            .weather
            .current(&record.locality, weather_span.context())
            .await
            .map_err(|e| {
                weather_span.record_error(&e);
                StageError::WeatherUnavailable(e)
            })?
    };

    Ok(EnrichedResponse::new(record.locality, sample))
}
