//! Logging setup
//!
//! Leveled lines go to standard output as `LEVEL message`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when neither `--debug` nor `RUST_LOG` says otherwise
const DEFAULT_FILTER: &str = "info";

/// Build the level filter for this run
///
/// `--debug` wins over `RUST_LOG`.
pub fn filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the process-wide subscriber
pub fn init(debug: bool) {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .without_time(),
        )
        .with(filter(debug))
        .init();
}
