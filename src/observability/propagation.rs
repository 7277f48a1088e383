//! Trace context propagation across the HTTP hop.
//!
//! # Responsibilities
//! - Extract trace context from incoming request headers
//! - Inject the active context into outbound request headers
//!
//! # Design Decisions
//! - W3C Trace Context (`traceparent` / `tracestate`) only
//! - Callers pass the context explicitly; nothing reads `Context::current()`
//!   except the propagator's own fallback for absent headers

use axum::http::HeaderMap;
use opentelemetry::propagation::TextMapPropagator;
use opentelemetry::Context;
use opentelemetry_http::{HeaderExtractor, HeaderInjector};
use opentelemetry_sdk::propagation::TraceContextPropagator;

/// Header carrying the trace and parent span ids.
pub const TRACEPARENT: &str = "traceparent";

/// Write `cx` into `headers`. A context without a valid span writes nothing.
pub fn inject_context(cx: &Context, headers: &mut HeaderMap) {
    TraceContextPropagator::new().inject_context(cx, &mut HeaderInjector(headers));
}

/// Read the remote parent from `headers`. Missing or malformed headers
/// yield a context without a span, so the next span starts a new trace.
pub fn extract_context(headers: &HeaderMap) -> Context {
    TraceContextPropagator::new().extract_with_context(&Context::new(), &HeaderExtractor(headers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    fn remote_context() -> Context {
        let span_context = SpanContext::new(
            TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap(),
            SpanId::from_hex("00f067aa0ba902b7").unwrap(),
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );
        Context::new().with_remote_span_context(span_context)
    }

    #[test]
    fn test_inject_writes_traceparent() {
        let mut headers = HeaderMap::new();
        inject_context(&remote_context(), &mut headers);
        assert_eq!(
            headers.get(TRACEPARENT).unwrap(),
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"
        );
    }

    #[test]
    fn test_extract_recovers_same_trace() {
        let mut headers = HeaderMap::new();
        inject_context(&remote_context(), &mut headers);

        let extracted = extract_context(&headers);
        let span = extracted.span();
        let sc = span.span_context();
        assert!(sc.is_valid());
        assert!(sc.is_remote());
        assert_eq!(sc.trace_id(), TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap());
        assert_eq!(sc.span_id(), SpanId::from_hex("00f067aa0ba902b7").unwrap());
    }

    #[test]
    fn test_empty_context_injects_nothing() {
        let mut headers = HeaderMap::new();
        inject_context(&Context::new(), &mut headers);
        assert!(headers.get(TRACEPARENT).is_none());
    }

    #[test]
    fn test_missing_or_garbage_header_has_no_parent() {
        assert!(!extract_context(&HeaderMap::new()).span().span_context().is_valid());

        let mut headers = HeaderMap::new();
        headers.insert(TRACEPARENT, "not-a-traceparent".parse().unwrap());
        assert!(!extract_context(&headers).span().span_context().is_valid());
    }
}
