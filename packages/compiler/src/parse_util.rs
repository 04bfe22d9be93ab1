//! Parse Utilities
//!
//! Source coordinates shared by the lexer, the parser and the template
//! expression extractor.

use serde::{Deserialize, Serialize};

use crate::chars;

/// Template document a location points into
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: Option<String>,
}

impl ParseSourceFile {
    pub fn new(content: String, url: Option<String>) -> Self {
        ParseSourceFile { content, url }
    }

    /// Line/column of the character at `offset` (0-based character offset).
    ///
    /// Offsets past the end resolve to the position right after the last
    /// character.
    pub fn position_at(&self, offset: usize) -> Position {
        let mut position = Position::start();
        let mut prev = chars::EOF;
        for ch in self.content.chars().take(offset) {
            position = position.advance(ch, prev);
            prev = ch;
        }
        position
    }

    /// Offset descriptor for a substring that begins at character `offset`
    pub fn offset_at(&self, offset: usize) -> OffsetDescriptor {
        OffsetDescriptor::from_position(offset, self.position_at(offset))
    }
}

/// Line/column pair. Lines are 1-based, columns are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    /// First character of a source text
    pub fn start() -> Self {
        Position { line: 1, column: 0 }
    }

    /// Position after consuming `ch`; `prev` is the character consumed
    /// before it, so that `\r\n` counts as a single line break.
    pub fn advance(self, ch: char, prev: char) -> Self {
        if ch == chars::LF && prev == chars::CR {
            self
        } else if chars::is_new_line(ch) {
            Position { line: self.line + 1, column: 0 }
        } else {
            Position { line: self.line, column: self.column + 1 }
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub fn new(start: Position, end: Position) -> Self {
        SourceLocation { start, end }
    }
}

/// Absolute character offsets plus line/column location of a token or node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub loc: SourceLocation,
}

impl Span {
    pub fn new(start: usize, end: usize, loc: SourceLocation) -> Self {
        Span { start, end, loc }
    }

    /// Span from the start of `self` to the end of `other`
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
            loc: SourceLocation::new(self.loc.start, other.loc.end),
        }
    }
}

/// Where, in the enclosing document, an extracted expression begins.
///
/// `line` and `column` are added to the 1-based line and 0-based column
/// the parser computes for the substring, so a substring that starts at
/// document line 5, column 7 is described by `line: 4, column: 7`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetDescriptor {
    #[serde(alias = "pos")]
    pub absolute_position: usize,
    pub line: usize,
    pub column: usize,
}

impl OffsetDescriptor {
    pub fn new(absolute_position: usize, line: usize, column: usize) -> Self {
        OffsetDescriptor {
            absolute_position,
            line,
            column,
        }
    }

    /// Descriptor for a substring whose first character sits at
    /// `absolute_position`, with document coordinates `position`.
    pub fn from_position(absolute_position: usize, position: Position) -> Self {
        OffsetDescriptor {
            absolute_position,
            line: position.line.saturating_sub(1),
            column: position.column,
        }
    }
}
