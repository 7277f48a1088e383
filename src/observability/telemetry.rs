//! Tracer provider bootstrap.
//!
//! With an OTLP endpoint configured, spans are batched to the collector over
//! gRPC. Without one, the provider still mints trace and span ids so the
//! context propagates between stages; nothing is exported.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::{ExporterBuildError, WithExportConfig};
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use opentelemetry_sdk::Resource;
use thiserror::Error;

use crate::observability::recorder::TracerRecorder;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build OTLP span exporter: {0}")]
    Exporter(#[from] ExporterBuildError),
}

/// Build the provider for one stage.
pub fn init_tracer_provider(
    service_name: &'static str,
    otlp_endpoint: Option<&str>,
) -> Result<SdkTracerProvider, TelemetryError> {
    let resource = Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .build();

    let mut builder = SdkTracerProvider::builder().with_resource(resource);

    if let Some(endpoint) = otlp_endpoint {
        let endpoint = normalize_endpoint(endpoint);
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint.clone())
            .build()?;
        builder = builder.with_batch_exporter(exporter);
        tracing::info!(service = service_name, endpoint = %endpoint, "OTLP span export enabled");
    } else {
        tracing::info!(service = service_name, "No OTLP endpoint configured, spans are not exported");
    }

    Ok(builder.build())
}

/// Span recorder backed by `provider`.
pub fn recorder_for(provider: &SdkTracerProvider, service_name: &'static str) -> TracerRecorder<SdkTracer> {
    TracerRecorder::new(provider.tracer(service_name))
}

/// Collectors are commonly addressed as bare `host:port`; tonic needs a scheme.
pub fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{endpoint}")
    }
}
