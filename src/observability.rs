//! Diagnostic logging for the command-line tool.
//!
//! Engine code emits `tracing` spans and events at debug level; the config
//! loader uses `log`, which the subscriber bridges. Logs go to stderr so
//! reports on stdout stay machine-readable.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map `-v` repetitions to a log level
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Build the filter; `RUST_LOG` wins when set
pub fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "answermap={}",
            level_for_verbosity(verbosity).as_str().to_lowercase()
        ))
    })
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
