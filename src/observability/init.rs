//! Subscriber setup.
//!
//! Builds the global `tracing` subscriber: an [`EnvFilter`] from the
//! configured level and an OpenTelemetry layer whose spans end up as OTLP JSON
//! lines in the plugin's data directory.
//!
//! ```text
//! tracing macros → EnvFilter → OpenTelemetryLayer → OtlpFileExporter → pantry-otlp.json
//! ```

use super::exporter::{file_tracer_provider, SCOPE_NAME};
use super::rotating::RotatingFile;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "pantry-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber, exporting spans to
/// `~/.local/share/zellij/pantry/pantry-otlp.json`.
///
/// Tracing is best effort: if the data directory cannot be created the plugin
/// runs without a subscriber. Calling this more than once has no effect.
///
/// # Parameters
///
/// * `config` - Plugin configuration; only `trace_level` is read. An unset or
///   unparsable level means `info`.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }
    init_tracing_at(&data_dir, config.trace_level.as_deref());
}

/// Installs the global subscriber writing into `dir`.
///
/// # Parameters
///
/// * `dir` - Existing directory that receives [`TRACE_FILE_NAME`]
/// * `level` - `EnvFilter` directive; `None` or an invalid directive means `info`
///
/// # Returns
///
/// `true` if this call installed the subscriber, `false` if one was already set.
pub fn init_tracing_at(dir: &Path, level: Option<&str>) -> bool {
    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = file_tracer_provider(RotatingFile::new(dir.join(TRACE_FILE_NAME)), resource);
    let tracer = provider.tracer(SCOPE_NAME);

    tracing_subscriber::registry()
        .with(level_filter(level))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init()
        .is_ok()
}

/// Parses `level`, falling back to [`DEFAULT_LEVEL`].
fn level_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_new(level.unwrap_or(DEFAULT_LEVEL)).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}
