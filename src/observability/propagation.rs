//! Trace continuity across the host request channel.
//!
//! A request leaves the plugin in one event handler and its completion comes
//! back in another. The issuing span's ids ride along in the request context
//! so the completion can be recorded as its child.

use opentelemetry::trace::{
    SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
};
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Serialized ids of the span that issued a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Trace id as 32 lowercase hex digits.
    pub trace_id: String,
    /// Issuing span id as 16 lowercase hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the current span, if it belongs to a valid trace.
    ///
    /// Returns `None` when tracing is not initialized or the span is disabled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        let context = tracing::Span::current().context();
        let span_ref = context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the remote parent for spans opened while the guard
    /// is held.
    ///
    /// Returns `None` if either id is not valid hex.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let remote = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(remote)
                .attach(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_context_without_a_subscriber() {
        assert_eq!(TraceContext::from_current(), None);
    }

    #[test]
    fn malformed_ids_do_not_attach() {
        let context = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "b7ad6b7169203331".to_string(),
        };
        assert!(context.attach().is_none());
    }

    #[test]
    fn well_formed_ids_attach() {
        let context = TraceContext {
            trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
            parent_span_id: "b7ad6b7169203331".to_string(),
        };
        let guard = context.attach();
        assert!(guard.is_some());
        let current = opentelemetry::Context::current();
        assert_eq!(
            format!("{:032x}", current.span().span_context().trace_id()),
            context.trace_id
        );
    }
}
