//! Tracing subscriber initialization.
//!
//! Installs a structured `fmt` layer filtered by `RUST_LOG`, and
//! optionally bridges spans to OpenTelemetry with a stdout exporter
//! (local development; swap for OTLP in production).

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Keeps the OTel pipeline alive; flushes and shuts it down on drop.
///
/// Hold the guard in `main` for the process lifetime. When OTel was not
/// enabled, dropping it is a no-op.
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("Warning: OTel tracer provider shutdown error: {e}");
            }
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Fails if a global subscriber has already been installed.
pub fn init_tracing(enable_otel: bool) -> Result<TracingGuard, TryInitError> {
    let env_filter = EnvFilter::from_default_env();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let registry = tracing_subscriber::registry().with(env_filter).with(fmt_layer);

    if !enable_otel {
        registry.try_init()?;
        return Ok(TracingGuard { provider: None });
    }

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
        .build();
    let tracer = provider.tracer("newsrag");

    registry
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .try_init()?;

    opentelemetry::global::set_tracer_provider(provider.clone());

    Ok(TracingGuard {
        provider: Some(provider),
    })
}
