//! Observability setup for Newsrag: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
