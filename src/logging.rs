//! Logging through `tracing` and `tracing-subscriber`.
//!
//! Library code only emits events; installing a subscriber is left to the
//! host (the Python extension calls [`init_logging`] on import).
//!
//! `RUST_LOG` takes precedence over the configured level.

use std::time::Instant;

use tracing::{debug_span, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TransformConfig;

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default filter directive, e.g. `info` or `coc_transform=debug`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    pub fn with_level(level: impl Into<String>) -> Self {
        Self { level: level.into() }
    }
}

impl From<&TransformConfig> for LogConfig {
    fn from(config: &TransformConfig) -> Self {
        Self::with_level(config.log_level.clone())
    }
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already set, which is not an error:
/// the extension module may be imported more than once per process.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok()
}

/// Run `f` inside a span and log how long it took.
pub fn timed<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let _span = debug_span!("timed", op = name).entered();
    let start = Instant::now();
    let result = f();
    let secs = (start.elapsed().as_secs_f64() * 1000.0).round() / 1000.0;
    info!(op = name, seconds = secs, "{name}() took {secs} seconds to run");
    result
}
