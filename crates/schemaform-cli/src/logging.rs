//! Logging setup for the CLI
//!
//! Maps `-v` counts onto a tracing level filter; `RUST_LOG` takes
//! precedence when set.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber from CLI verbosity
pub fn init(verbosity: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}
