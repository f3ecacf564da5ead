use anyhow::Result;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use tracing::subscriber::Subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, registry::LookupSpan, EnvFilter, Layer, Registry,
};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

/// Configures tracing and optionally enables an open-telemetry OTLP exporter.
///
/// The open-telemetry configuration is controlled via environment variables as defined in the
/// [specification](https://github.com/open-telemetry/opentelemetry-specification/blob/main/specification/protocol/exporter.md#opentelemetry-protocol-exporter)
pub fn setup_tracing(enable_otel: bool) -> Result<()> {
    let otel_layer = if enable_otel {
        opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());
        Some(open_telemetry_layer()?)
    } else {
        None
    };

    let subscriber = Registry::default().with(stdout_layer()).with(otel_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(Into::into)
}

fn open_telemetry_layer<S>() -> Result<Box<dyn Layer<S> + Send + Sync + 'static>>
where
    S: Subscriber + Sync + Send,
    for<'a> S: LookupSpan<'a>,
{
    let exporter = opentelemetry_otlp::SpanExporter::builder().with_tonic().build()?;

    let provider = opentelemetry_sdk::trace::TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .build();

    let tracer = provider.tracer("tracing-otel-subscriber");
    opentelemetry::global::set_tracer_provider(provider);

    Ok(OpenTelemetryLayer::new(tracer).boxed())
}

fn stdout_layer<S>() -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .compact()
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .boxed()
}
