//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request headers
//!     → propagation.rs (extract W3C trace context)
//!     → recorder.rs (child spans for each pipeline step)
//!     → propagation.rs (inject into the next outbound hop)
//!
//! Every handled request:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Process startup:
//!     → telemetry.rs (tracer provider + optional OTLP exporter)
//! ```
//!
//! # Design Decisions
//! - No process-global tracer or propagator; handlers receive a
//!   `SpanRecorder` through their state
//! - Recording an error on a span never changes the response
//! - Request ID flows through both stages alongside the trace context

pub mod logging;
pub mod metrics;
pub mod propagation;
pub mod recorder;
pub mod telemetry;

pub use propagation::{extract_context, inject_context};
pub use recorder::{NoopRecorder, SpanRecorder, SpanScope, TracerRecorder};
