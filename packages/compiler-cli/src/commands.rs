//! Commands
//!
//! `parse` turns one expression into an annotated tree or a binding list.
//! `scan` does the same for every `{ ... }` region of a template document,
//! parsing the regions in parallel.

use anyhow::Context;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use endorphin_compiler::expression_parser::ExpressionScanner;
use endorphin_compiler::{
    collect_bindings, Binding, ParseOptions, Parser, Program, Result, SyntaxError,
};

use crate::config::ExpressionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Full annotated tree
    #[default]
    Tree,
    /// Classified identifiers only
    Bindings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Tree(Program),
    Bindings(Vec<Binding>),
}

/// Parser configured with the globals of `config`
pub fn build_parser(config: &ExpressionConfig) -> Parser {
    Parser::new().with_globals(config.global_list())
}

/// Base options carrying the helpers of `config`
pub fn build_options(config: &ExpressionConfig) -> ParseOptions {
    ParseOptions::new().with_helpers(config.helper_list())
}

pub fn parse_expression(
    parser: &Parser,
    code: &str,
    options: &ParseOptions,
    mode: OutputMode,
) -> Result<Output> {
    let program = parser.parse_js(code, options)?;
    Ok(match mode {
        OutputMode::Tree => Output::Tree(program),
        OutputMode::Bindings => Output::Bindings(collect_bindings(&program)),
    })
}

/// One expression region of a scanned document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEntry {
    pub code: String,
    /// Offset of the opening brace
    pub start: usize,
    /// Offset right after the closing brace
    pub end: usize,
    #[serde(flatten)]
    pub outcome: ScanOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScanOutcome {
    #[serde(rename = "result")]
    Parsed(Output),
    #[serde(rename = "error")]
    Failed(SyntaxError),
}

impl ScanEntry {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, ScanOutcome::Failed(_))
    }
}

/// Parse every expression region of `document`.
///
/// Fails only when a region has no closing brace; syntax errors inside a
/// region are reported on its entry.
pub fn scan_document(
    parser: &Parser,
    document: &str,
    options: &ParseOptions,
    mode: OutputMode,
) -> Result<Vec<ScanEntry>> {
    let expressions = ExpressionScanner::new(document).collect::<Result<Vec<_>>>()?;
    debug!(count = expressions.len(), "scanned document");

    let entries = expressions
        .into_par_iter()
        .map(|extracted| {
            let options = ParseOptions {
                offset: Some(extracted.offset),
                ..options.clone()
            };
            let outcome = match parse_expression(parser, &extracted.code, &options, mode) {
                Ok(output) => ScanOutcome::Parsed(output),
                Err(err) => ScanOutcome::Failed(err),
            };
            ScanEntry {
                code: extracted.code,
                start: extracted.start,
                end: extracted.end,
                outcome,
            }
        })
        .collect();
    Ok(entries)
}

/// Read `path` and scan it, reporting errors against the file name
pub fn scan_file(
    parser: &Parser,
    path: &Path,
    options: &ParseOptions,
    mode: OutputMode,
) -> anyhow::Result<Vec<ScanEntry>> {
    let document = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;

    let mut options = options.clone();
    if options.url.is_none() {
        options.url = Some(path.display().to_string());
    }

    let entries = scan_document(parser, &document, &options, mode)?;
    info!(
        path = %path.display(),
        expressions = entries.len(),
        errors = entries.iter().filter(|e| e.is_error()).count(),
        "scanned template"
    );
    Ok(entries)
}
