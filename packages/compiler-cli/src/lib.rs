#![deny(clippy::all)]

/**
 * Endorphin Expression CLI
 *
 * Command-line front end for the template expression parser
 */
// Re-export compiler for convenience
pub use endorphin_compiler as compiler;

// CLI-specific modules
pub mod args;
pub mod commands;
pub mod config;
pub mod logging;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
