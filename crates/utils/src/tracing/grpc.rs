/// Creates a [`tracing::Span`] based on RPC service and method name.
macro_rules! rpc_span {
    ($service:expr, $method:expr) => {
        tracing::info_span!(
            concat!($service, "/", $method),
            rpc.service = $service,
            rpc.method = $method
        )
    };
}

/// A [`trace_fn`](tonic::transport::server::Server) implementation for the notification service
/// which adds open-telemetry information to the span.
///
/// Creates an `info` span following the open-telemetry standard: `notification.rpc/{method}`.
/// Additionally also pulls in remote tracing context which allows the server trace to be connected
/// to the client's origin trace.
pub fn notification_trace_fn<T>(request: &http::Request<T>) -> tracing::Span {
    let span = match request.uri().path().rsplit('/').next() {
        Some("TransactionNotifications") => {
            rpc_span!("notification.rpc", "TransactionNotifications")
        },
        Some("UtxosNotifications") => rpc_span!("notification.rpc", "UtxosNotifications"),
        Some("AddWebhook") => rpc_span!("notification.rpc", "AddWebhook"),
        Some("RemoveWebhook") => rpc_span!("notification.rpc", "RemoveWebhook"),
        Some("ListWebhooks") => rpc_span!("notification.rpc", "ListWebhooks"),
        _ => rpc_span!("notification.rpc", "Unknown"),
    };

    add_otel_span_attributes(span, request)
}

/// Adds remote tracing context to the span.
fn add_otel_span_attributes<T>(span: tracing::Span, request: &http::Request<T>) -> tracing::Span {
    use super::OpenTelemetrySpanExt;
    // gRPC metadata is transferred using HTTP headers, so the HTTP extractor is sufficient.
    let otel_ctx = opentelemetry::global::get_text_map_propagator(|propagator| {
        propagator.extract(&MetadataExtractor(&tonic::metadata::MetadataMap::from_headers(
            request.headers().clone(),
        )))
    });
    tracing_opentelemetry::OpenTelemetrySpanExt::set_parent(&span, otel_ctx);

    // Set HTTP attributes.
    // See https://opentelemetry.io/docs/specs/semconv/rpc/rpc-spans/#server-attributes.
    span.set_attribute("rpc.system", "grpc");
    if let Some(host) = request.uri().host() {
        span.set_attribute("server.address", host.to_string());
    }
    if let Some(port) = request.uri().port_u16() {
        span.set_attribute("server.port", i64::from(port));
    }
    let remote_addr = request
        .extensions()
        .get::<tonic::transport::server::TcpConnectInfo>()
        .and_then(tonic::transport::server::TcpConnectInfo::remote_addr);
    if let Some(addr) = remote_addr {
        span.set_attribute("client.address", addr.ip().to_string());
        span.set_attribute("client.port", i64::from(addr.port()));
        span.set_attribute("network.transport", "tcp");
        match addr.ip() {
            std::net::IpAddr::V4(_) => span.set_attribute("network.type", "ipv4"),
            std::net::IpAddr::V6(_) => span.set_attribute("network.type", "ipv6"),
        }
    }

    span
}

struct MetadataExtractor<'a>(&'a tonic::metadata::MetadataMap);
impl opentelemetry::propagation::Extractor for MetadataExtractor<'_> {
    /// Get a value for a key from the `MetadataMap`.  If the value can't be converted to &str,
    /// returns None
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|metadata| metadata.to_str().ok())
    }

    /// Collect all the keys from the `MetadataMap`.
    fn keys(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(|key| match key {
                tonic::metadata::KeyRef::Ascii(v) => v.as_str(),
                tonic::metadata::KeyRef::Binary(v) => v.as_str(),
            })
            .collect::<Vec<_>>()
    }
}
