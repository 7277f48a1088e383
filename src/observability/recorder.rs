//! Span recording capability injected into the stage handlers.
//!
//! # Responsibilities
//! - Open a child span under an explicit parent context
//! - Record errors against the span (event + error status)
//! - End the span when its scope is dropped
//!
//! # Design Decisions
//! - Handlers depend on `dyn SpanRecorder`, never on a global tracer
//! - `NoopRecorder` passes the parent through, so trace identity still
//!   propagates in tests that do not care about spans

use std::borrow::Cow;
use std::error::Error;

use opentelemetry::trace::{Span, SpanKind, Status, TraceContextExt, Tracer};
use opentelemetry::{Context, KeyValue};

/// Something that can open spans for the request pipeline.
pub trait SpanRecorder: Send + Sync {
    /// Open `name` as a child of `parent`.
    fn start(&self, name: &'static str, kind: SpanKind, parent: &Context) -> SpanScope;
}

/// An open span. Ends the span on drop if this scope created it.
#[must_use = "the span ends as soon as the scope is dropped"]
pub struct SpanScope {
    cx: Context,
    owns_span: bool,
}

impl SpanScope {
    fn owned(cx: Context) -> Self {
        Self { cx, owns_span: true }
    }

    fn passthrough(parent: &Context) -> Self {
        Self {
            cx: parent.clone(),
            owns_span: false,
        }
    }

    /// Context to use as parent for nested spans and for injection.
    pub fn context(&self) -> &Context {
        &self.cx
    }

    pub fn record_error(&self, err: &(dyn Error + 'static)) {
        if !self.owns_span {
            return;
        }
        let span = self.cx.span();
        span.record_error(err);
        span.set_status(Status::error(err.to_string()));
    }

    pub fn set_attribute(&self, attribute: KeyValue) {
        if self.owns_span {
            self.cx.span().set_attribute(attribute);
        }
    }
}

impl Drop for SpanScope {
    fn drop(&mut self) {
        if self.owns_span {
            self.cx.span().end();
        }
    }
}

/// Records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRecorder;

impl SpanRecorder for NoopRecorder {
    fn start(&self, _name: &'static str, _kind: SpanKind, parent: &Context) -> SpanScope {
        SpanScope::passthrough(parent)
    }
}

/// Records spans through an OpenTelemetry tracer.
#[derive(Debug, Clone)]
pub struct TracerRecorder<T> {
    tracer: T,
}

impl<T> TracerRecorder<T> {
    pub fn new(tracer: T) -> Self {
        Self { tracer }
    }
}

impl<T> SpanRecorder for TracerRecorder<T>
where
    T: Tracer + Send + Sync,
    T::Span: Span + Send + Sync + 'static,
{
    fn start(&self, name: &'static str, kind: SpanKind, parent: &Context) -> SpanScope {
        let span = self
            .tracer
            .span_builder(Cow::Borrowed(name))
            .with_kind(kind)
            .start_with_context(&self.tracer, parent);
        SpanScope::owned(parent.with_span(span))
    }
}
