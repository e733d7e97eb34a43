//! Observability setup for Persona: log filtering, structured output, and
//! optional OpenTelemetry span export.

pub mod tracing_setup;

pub use tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};
