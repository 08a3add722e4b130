//! Tracer setup and management

use loadspec_core::ObservabilityConfig;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::{Arc, OnceLock};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Global tracer provider holder
static TRACER_PROVIDER: OnceLock<Arc<TracerProvider>> = OnceLock::new();

/// Initialize logging and tracing.
///
/// This sets up:
/// - A tracer provider backing the OpenTelemetry layer
/// - Integration with the tracing subscriber
/// - Text or JSON log output, filtered by `RUST_LOG` or `config.log_level`
///
/// Returns `false` when a global subscriber was already installed.
///
/// # Example
///
/// ```rust,no_run
/// use loadspec_core::ObservabilityConfig;
/// use loadspec_telemetry::init_telemetry;
///
/// init_telemetry(&ObservabilityConfig::default());
/// ```
pub fn init_telemetry(config: &ObservabilityConfig) -> bool {
    let tracer_provider = TracerProvider::builder().build();
    let tracer = tracer_provider.tracer(config.service_name.clone());

    let _ = TRACER_PROVIDER.set(Arc::new(tracer_provider));

    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let json_layer = config.json_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_line_number(true)
    });
    let text_layer = (!config.json_logs).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(json_layer)
        .with(text_layer)
        .with(filter)
        .try_init()
        .is_ok()
}

/// Get the global tracer provider if initialized
pub fn tracer_provider() -> Option<Arc<TracerProvider>> {
    TRACER_PROVIDER.get().cloned()
}
