//! Logging
//!
//! Installs the `tracing` subscriber used by the command-line tools.
//! Everything goes to stderr so stdout only ever carries JSON output.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count
pub fn directive_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialise the global subscriber.
///
/// Without `-v`, `RUST_LOG` decides what is shown.
pub fn init_logging(verbosity: u8) {
    let filter = if verbosity == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive_for(0)))
    } else {
        EnvFilter::new(directive_for(verbosity))
    };

    // A subscriber may already be installed by an embedding process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
