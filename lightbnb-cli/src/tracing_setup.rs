//! Log and trace output for `lightbnb`
//!
//! Everything is written to stderr; stdout carries only command JSON.
//! `RUST_LOG` wins over `--debug`. Without either, only warnings show.
//! `--otel` adds an OTLP span exporter when built with `--features telemetry`
//! (endpoint from `OTEL_EXPORTER_OTLP_ENDPOINT`, service name from
//! `OTEL_SERVICE_NAME`).

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Show repository spans and statement text
    pub debug: bool,
    /// Ship spans over OTLP as well
    pub otel: bool,
}

const DEFAULT_LEVEL: &str = "warn";
const DEBUG_LEVEL: &str = "lightbnb=debug,lightbnb_db=debug,sqlx=warn";

fn env_filter(config: &TracingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if config.debug { DEBUG_LEVEL } else { DEFAULT_LEVEL })
    })
}

fn init_console(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(feature = "telemetry")]
fn init_with_otlp(config: &TracingConfig) -> Result<()> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::TracerProvider;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());
    let service =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "lightbnb".to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
        .map_err(|e| anyhow!("cannot build OTLP exporter for {endpoint}: {e}"))?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(opentelemetry_sdk::Resource::new(vec![KeyValue::new(
            "service.name",
            service.clone(),
        )]))
        .build();
    let layer = tracing_opentelemetry::layer().with_tracer(provider.tracer("lightbnb"));

    // The global handle keeps the batch exporter alive until shutdown_otel.
    let _ = opentelemetry::global::set_tracer_provider(provider);

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(config.debug)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(layer)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    tracing::debug!(%endpoint, %service, "exporting spans over OTLP");
    Ok(())
}

/// Flush queued spans before exit.
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}

/// Install the global subscriber for this process.
pub fn init(config: &TracingConfig) -> Result<()> {
    #[cfg(feature = "telemetry")]
    if config.otel {
        return init_with_otlp(config);
    }

    init_console(config)?;
    if config.otel {
        tracing::warn!("--otel ignored: built without the telemetry feature");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_filter_targets_our_crates() {
        let filter = EnvFilter::new(DEBUG_LEVEL).to_string();
        assert!(filter.contains("lightbnb_db=debug"));
        assert!(filter.contains("sqlx=warn"));
    }

    #[test]
    fn second_init_reports_error() {
        let config = TracingConfig::default();
        // Whichever call comes first wins; a repeat must fail, not panic.
        let _ = init(&config);
        assert!(init(&config).is_err());
    }
}
