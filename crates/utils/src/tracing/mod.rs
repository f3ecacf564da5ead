pub mod grpc;

use opentelemetry::{Key, Value};

/// Span helpers that keep `opentelemetry` types out of call sites.
pub trait OpenTelemetrySpanExt {
    fn set_attribute(&self, key: impl Into<Key>, value: impl Into<Value>);
}

impl OpenTelemetrySpanExt for tracing::Span {
    fn set_attribute(&self, key: impl Into<Key>, value: impl Into<Value>) {
        tracing_opentelemetry::OpenTelemetrySpanExt::set_attribute(self, key, value);
    }
}
