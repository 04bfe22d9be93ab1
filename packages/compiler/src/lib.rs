#![deny(clippy::all)]

/**
 * Endorphin Expression Compiler
 *
 * Parses template expressions with sigil-prefixed identifiers and annotates
 * every identifier with the binding context it resolves against.
 */

// Core modules
pub mod chars;
pub mod error;
pub mod parse_util;

// Parser modules
pub mod expression_parser;

// Re-exports
pub use error::{Result, SyntaxError};
pub use expression_parser::{
    collect_bindings, parse_js, serialize, Binding, BindingContext, GlobalAllowList,
    HelperAllowList, ParseOptions, Parser, Program,
};
pub use parse_util::{OffsetDescriptor, Position, SourceLocation, Span};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
