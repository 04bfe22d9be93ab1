//! Compiler errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parse_util::Position;

/// Source text does not conform to the expression grammar.
///
/// `pos` and `loc` are in the coordinate space of the enclosing document
/// whenever the expression was parsed with an offset descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}{message} ({loc})", url_prefix(.url))]
pub struct SyntaxError {
    pub message: String,
    pub pos: usize,
    pub loc: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, pos: usize, loc: Position) -> Self {
        SyntaxError {
            message: message.into(),
            pos,
            loc,
            url: None,
        }
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }
}

fn url_prefix(url: &Option<String>) -> String {
    url.as_ref().map(|url| format!("{}: ", url)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, SyntaxError>;
