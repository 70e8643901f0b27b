use std::io;
use tracing_subscriber::{fmt, EnvFilter};

use crate::types::LogFormat;

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

/// Initialize the tracing subscriber in the requested output format.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
///
/// Later calls are no-ops once a global subscriber is installed.
pub fn init_logging(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stdout);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
