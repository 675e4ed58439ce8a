//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber with OpenTelemetry
//! integration, wiring the complete pipeline from `tracing` macros to file
//! export.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Sets up a tracing subscriber pipeline that:
/// 1. Filters spans based on the configured trace level
/// 2. Exports spans to OpenTelemetry
/// 3. Serializes spans to OTLP JSON format
/// 4. Writes to a rotating file with backups
///
/// # Trace Level Resolution
///
/// Level is determined by:
/// 1. `RUST_LOG` environment variable if set
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # File Location
///
/// Traces are written to `keja-otlp.json` under the configured data
/// directory (`~/.local/share/keja` by default).
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently returns if directory creation fails (observability is optional)
/// - Idempotent: safe to call multiple times (only the first call takes effect)
///
/// # Example
///
/// ```no_run
/// use keja::observability::init_tracing;
/// use keja::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = config.data_dir.as_deref().map_or_else(
        crate::infrastructure::paths::get_data_dir,
        |dir| std::path::PathBuf::from(crate::infrastructure::paths::expand_tilde(dir)),
    );
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", "keja")]);

    let trace_file = data_dir.join("keja-otlp.json");
    let provider = tracer::create_tracer_provider(trace_file, resource);

    let tracer = provider.tracer("keja");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer);

    let _ = subscriber.try_init();
}
