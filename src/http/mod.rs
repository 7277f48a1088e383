//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, body decode)
//!     → gateway.rs | enrichment.rs (stage pipeline)
//!     → error.rs (failure → status + {"message"})
//!     → response.rs (relay, health)
//!     → Send to client
//! ```

pub mod enrichment;
pub mod error;
pub mod gateway;
pub mod request;
pub mod response;
pub mod server;

pub use enrichment::EnrichmentState;
pub use error::StageError;
pub use gateway::GatewayState;
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
