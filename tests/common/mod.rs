//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;

use cep_weather::config::{EnrichmentConfig, GatewayConfig, ListenerConfig};
use cep_weather::http::{enrichment, gateway, EnrichmentState, GatewayState, HttpServer};
use cep_weather::observability::SpanRecorder;
use cep_weather::Shutdown;

/// Serve `server` on an ephemeral local port.
pub async fn spawn(server: HttpServer, shutdown: &Shutdown) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    addr
}

pub fn enrichment_config(directory_url: &str, weather_url: &str, weather_api_key: Option<&str>) -> EnrichmentConfig {
    EnrichmentConfig {
        listener: ListenerConfig::default(),
        directory_url: directory_url.to_string(),
        weather_url: weather_url.to_string(),
        weather_api_key: weather_api_key.map(str::to_string),
        upstream_timeout_secs: 5,
    }
}

pub async fn spawn_enrichment(
    config: &EnrichmentConfig,
    recorder: Arc<dyn SpanRecorder>,
    shutdown: &Shutdown,
) -> SocketAddr {
    let state = EnrichmentState::from_config(config, recorder).unwrap();
    let server = HttpServer::new(enrichment::STAGE, enrichment::router(state), &config.listener);
    spawn(server, shutdown).await
}

pub async fn spawn_gateway(enrichment_url: &str, recorder: Arc<dyn SpanRecorder>, shutdown: &Shutdown) -> SocketAddr {
    spawn_gateway_with_timeout(enrichment_url, 5, recorder, shutdown).await
}

pub async fn spawn_gateway_with_timeout(
    enrichment_url: &str,
    enrichment_timeout_secs: u64,
    recorder: Arc<dyn SpanRecorder>,
    shutdown: &Shutdown,
) -> SocketAddr {
    let config = GatewayConfig {
        enrichment_url: enrichment_url.to_string(),
        enrichment_timeout_secs,
        ..GatewayConfig::default()
    };
    let state = GatewayState::new(&config, recorder).unwrap();
    let server = HttpServer::new(gateway::STAGE, gateway::router(state), &config.listener);
    spawn(server, shutdown).await
}

/// Requests seen by a capture backend.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<(HeaderMap, Bytes)>>>);

#[allow(dead_code)]
impl Captured {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn header(&self, index: usize, name: &str) -> Option<String> {
        self.0.lock().unwrap()[index]
            .0
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn body(&self, index: usize) -> Bytes {
        self.0.lock().unwrap()[index].1.clone()
    }
}

/// Stand-in enrichment stage that records every `/weather` request and
/// answers with a fixed status and body.
#[allow(dead_code)]
pub async fn spawn_capture_backend(status: StatusCode, body: &'static str) -> (SocketAddr, Captured) {
    let captured = Captured::default();
    let sink = captured.clone();
    let app = Router::new().route(
        "/weather",
        any(move |headers: HeaderMap, request_body: Bytes| {
            let sink = sink.clone();
            async move {
                sink.0.lock().unwrap().push((headers, request_body));
                (status, body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, captured)
}

/// Stand-in enrichment stage that answers `/weather` only after `delay`.
#[allow(dead_code)]
pub async fn spawn_slow_backend(delay: Duration) -> SocketAddr {
    let app = Router::new().route(
        "/weather",
        any(move || async move {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, "{}")
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
