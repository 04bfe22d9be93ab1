//! Expression extraction
//!
//! Locates `{ ... }` expression regions in a template document and hands
//! out their inner code together with the [`OffsetDescriptor`] the parser
//! needs to report document coordinates.

use serde::{Deserialize, Serialize};

use super::parser::ParseOptions;
use crate::chars;
use crate::error::{Result, SyntaxError};
use crate::parse_util::{OffsetDescriptor, ParseSourceFile, Position};

/// Expression code cut out of a template document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedExpression {
    /// Code between the braces
    pub code: String,
    /// Where `code` starts in the document
    pub offset: OffsetDescriptor,
    /// Offset of the opening brace
    pub start: usize,
    /// Offset right after the closing brace
    pub end: usize,
}

impl ExtractedExpression {
    /// Parse options that place the expression at its document position
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new().with_offset(self.offset)
    }
}

/// Consume the balanced `{`/`}` pair that opens at character `pos`.
///
/// Returns `Ok(None)` when there is no `{` at `pos`. Braces inside quoted
/// strings do not count towards the balance.
pub fn extract_expression(document: &str, pos: usize) -> Result<Option<ExtractedExpression>> {
    let input: Vec<char> = document.chars().collect();
    if input.get(pos) != Some(&chars::LBRACE) {
        return Ok(None);
    }

    let file = ParseSourceFile::new(document.to_string(), None);
    let Some(close) = find_closing_brace(&input, pos) else {
        return Err(unmatched_brace(pos, file.position_at(pos)));
    };

    let begin = pos + 1;
    Ok(Some(ExtractedExpression {
        code: input[begin..close].iter().collect(),
        offset: file.offset_at(begin),
        start: pos,
        end: close + 1,
    }))
}

/// Iterator over every top-level `{ ... }` region of a document.
///
/// Stops after the first unbalanced brace, which is yielded as an error.
pub struct ExpressionScanner {
    input: Vec<char>,
    index: usize,
    prev: char,
    position: Position,
    done: bool,
}

impl ExpressionScanner {
    pub fn new(document: &str) -> Self {
        ExpressionScanner {
            input: document.chars().collect(),
            index: 0,
            prev: chars::EOF,
            position: Position::start(),
            done: false,
        }
    }

    fn advance_to(&mut self, target: usize) {
        while self.index < target && self.index < self.input.len() {
            let ch = self.input[self.index];
            self.position = self.position.advance(ch, self.prev);
            self.prev = ch;
            self.index += 1;
        }
    }
}

impl Iterator for ExpressionScanner {
    type Item = Result<ExtractedExpression>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while self.index < self.input.len() {
            if self.input[self.index] != chars::LBRACE {
                self.advance_to(self.index + 1);
                continue;
            }

            let open = self.index;
            let Some(close) = find_closing_brace(&self.input, open) else {
                self.done = true;
                return Some(Err(unmatched_brace(open, self.position)));
            };

            self.advance_to(open + 1);
            let offset = OffsetDescriptor::from_position(open + 1, self.position);
            let code = self.input[open + 1..close].iter().collect();
            self.advance_to(close + 1);

            return Some(Ok(ExtractedExpression {
                code,
                offset,
                start: open,
                end: close + 1,
            }));
        }

        self.done = true;
        None
    }
}

fn find_closing_brace(input: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut i = open;

    while i < input.len() {
        let ch = input[i];
        match quote {
            Some(_) if ch == chars::BACKSLASH => {
                i += 2;
                continue;
            }
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if chars::is_quote(ch) => quote = Some(ch),
            None if ch == chars::LBRACE => depth += 1,
            None if ch == chars::RBRACE => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            None => {}
        }
        i += 1;
    }

    None
}

fn unmatched_brace(pos: usize, loc: Position) -> SyntaxError {
    SyntaxError::new("Unable to find matching pair for '{'", pos, loc)
}
