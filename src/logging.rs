//! Tracing subscriber setup for the CLI
//!
//! Logs go to stderr so stdout stays reserved for JSON and generated source.

use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` applies. Calling this twice is
/// harmless, the second call is ignored.
pub fn init(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
