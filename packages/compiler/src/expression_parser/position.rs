//! Position translation
//!
//! Expressions are substrings of a larger template document. The lexer
//! computes offsets and line/column locations relative to the substring;
//! [`PositionTranslator`] moves them into document coordinates as each token
//! is emitted, before the parser builds nodes out of them.

use super::lexer::Token;
use crate::parse_util::{OffsetDescriptor, Position, Span};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionTranslator {
    offset: Option<OffsetDescriptor>,
}

impl PositionTranslator {
    pub fn new(offset: Option<OffsetDescriptor>) -> Self {
        PositionTranslator { offset }
    }

    /// Translator that leaves every position untouched
    pub fn identity() -> Self {
        PositionTranslator { offset: None }
    }

    pub fn offset(&self) -> Option<OffsetDescriptor> {
        self.offset
    }

    pub fn translate_token(&self, token: &mut Token) {
        token.span = self.translate_span(token.span);
    }

    pub fn translate_span(&self, span: Span) -> Span {
        let Some(offset) = self.offset else {
            return span;
        };
        let mut span = span;
        span.start += offset.absolute_position;
        span.end += offset.absolute_position;
        span.loc.start = translate_position(span.loc.start, &offset);
        span.loc.end = translate_position(span.loc.end, &offset);
        span
    }

    pub fn translate_offset(&self, pos: usize) -> usize {
        self.offset.map_or(pos, |offset| pos + offset.absolute_position)
    }

    pub fn translate_position(&self, position: Position) -> Position {
        match &self.offset {
            Some(offset) => translate_position(position, offset),
            None => position,
        }
    }
}

/// Only the first line of a substring shares its line with the text that
/// precedes the substring in the document, so only first-line columns move.
fn translate_position(position: Position, offset: &OffsetDescriptor) -> Position {
    let column = if position.line == 1 {
        position.column + offset.column
    } else {
        position.column
    };
    Position {
        line: position.line + offset.line,
        column,
    }
}
