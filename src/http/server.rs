//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap a stage's routes with the shared middleware stack
//!   (request ID, access tracing, inbound deadline)
//! - Bind the server to a listener
//! - Stop accepting and drain on shutdown

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ListenerConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};

/// HTTP server for one stage.
pub struct HttpServer {
    stage: &'static str,
    router: Router,
}

impl HttpServer {
    /// Create a server for `stage` serving `routes`.
    pub fn new(stage: &'static str, routes: Router, listener: &ListenerConfig) -> Self {
        let router = Self::build_router(routes, listener);
        Self { stage, router }
    }

    /// Apply the middleware layers, outermost first.
    #[allow(deprecated)]
    fn build_router(routes: Router, listener: &ListenerConfig) -> Router {
        routes.layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(TimeoutLayer::new(Duration::from_secs(listener.request_timeout_secs))),
        )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn stage(&self) -> &'static str {
        self.stage
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(stage = self.stage, address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!(stage = self.stage, "HTTP server stopped");
        Ok(())
    }
}
