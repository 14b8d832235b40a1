//! Tracing with file-based OTLP export.
//!
//! Spans and events from `tracing` macros are bridged into OpenTelemetry and
//! written as OTLP JSON lines to a rotating file under the plugin data
//! directory. The level comes from the `trace_level` plugin option and
//! defaults to `info`.
//!
//! - [`init`]: subscriber installation
//! - [`exporter`]: OTLP JSON formatting and the span exporter
//! - [`rotating`]: size-rotated line writer
//! - [`propagation`]: carrying span ids through the host request channel

pub mod exporter;
mod init;
pub mod propagation;
pub mod rotating;

pub use init::{init_tracing, init_tracing_at, TRACE_FILE_NAME};
pub use propagation::TraceContext;
