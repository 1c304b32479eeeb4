//! Logging, trace export and error reporting shared by Software Factory services.
//!
//! `install` wires a `tracing` subscriber (JSON or text, filtered by `RUST_LOG`) and, when
//! `ENABLE_OTEL` and an OTLP endpoint are set, an OpenTelemetry span exporter.

use anyhow::Result;

mod config;
mod reporter;
mod tracing_init;

pub use config::{TelemetryConfig, TelemetryProtocol};
#[cfg(any(test, feature = "testkit"))]
pub use reporter::MemoryErrorReporter;
pub use reporter::{ErrorReporter, TracingErrorReporter, error_chain};
pub use tracing_init::{init_telemetry, shutdown_telemetry};

/// Installs the shared telemetry subscriber configured from the environment.
pub fn install(service_name: &str) -> Result<()> {
    init_telemetry(TelemetryConfig::from_env(
        service_name,
        env!("CARGO_PKG_VERSION"),
    ))
}
