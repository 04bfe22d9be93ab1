//! Argument helpers
//!
//! Parsing of command-line values that clap cannot convert on its own.

use anyhow::{anyhow, Context};
use std::io::Read;

use endorphin_compiler::OffsetDescriptor;

/// Parse an offset descriptor written as `POS:LINE:COLUMN`.
///
/// Negative or non-numeric components are rejected.
pub fn parse_offset(value: &str) -> anyhow::Result<OffsetDescriptor> {
    let parts: Vec<&str> = value.split(':').collect();
    let [pos, line, column] = parts.as_slice() else {
        return Err(anyhow!("Expected POS:LINE:COLUMN, got {:?}", value));
    };

    let component = |name: &str, text: &str| -> anyhow::Result<usize> {
        text.trim()
            .parse::<usize>()
            .with_context(|| format!("Invalid {} in offset {:?}", name, value))
    };

    Ok(OffsetDescriptor::new(
        component("position", *pos)?,
        component("line", *line)?,
        component("column", *column)?,
    ))
}

/// Expression source from the command line, or all of `reader` when omitted
pub fn read_source<R: Read>(expression: Option<&str>, mut reader: R) -> anyhow::Result<String> {
    if let Some(expression) = expression {
        return Ok(expression.to_string());
    }

    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .context("Failed to read expression from stdin")?;
    let trimmed = source.trim_end_matches(['\r', '\n']).len();
    source.truncate(trimmed);
    Ok(source)
}
