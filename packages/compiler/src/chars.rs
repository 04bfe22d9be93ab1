/*
 * Character Codes
 *
 * Character constants and predicates shared by the expression lexer and
 * the template expression extractor.
 */

// Special characters
pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const LF: char = '\n'; // Line feed
pub const VTAB: char = '\x0B';
pub const FF: char = '\x0C';
pub const CR: char = '\r'; // Carriage return
pub const SPACE: char = ' ';
pub const NBSP: char = '\u{00A0}';
pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

// Punctuation
pub const DQ: char = '"';
pub const HASH: char = '#';
pub const DOLLAR: char = '$';
pub const SQ: char = '\'';
pub const LPAREN: char = '(';
pub const RPAREN: char = ')';
pub const STAR: char = '*';
pub const PLUS: char = '+';
pub const COMMA: char = ',';
pub const MINUS: char = '-';
pub const PERIOD: char = '.';
pub const SLASH: char = '/';
pub const COLON: char = ':';
pub const SEMICOLON: char = ';';
pub const AT: char = '@';
pub const BACKSLASH: char = '\\';
pub const UNDERSCORE: char = '_';
pub const BT: char = '`';

// Brackets and braces
pub const LBRACKET: char = '[';
pub const RBRACKET: char = ']';
pub const LBRACE: char = '{';
pub const RBRACE: char = '}';

/// Check if character is whitespace (line terminators included)
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, SPACE | TAB | VTAB | FF | NBSP | '\u{FEFF}') || is_new_line(ch)
}

/// Check if character is a line terminator
pub fn is_new_line(ch: char) -> bool {
    matches!(ch, LF | CR | LINE_SEPARATOR | PARAGRAPH_SEPARATOR)
}

/// Check if character is a digit
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if character is ASCII hex digit
pub fn is_ascii_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

/// Check if character is a quote
pub fn is_quote(ch: char) -> bool {
    ch == SQ || ch == DQ || ch == BT
}

/// Check if character can start a plain identifier
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == UNDERSCORE || ch == DOLLAR || (!ch.is_ascii() && ch.is_alphabetic())
}

/// Check if character can be part of an identifier
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || is_digit(ch) || (!ch.is_ascii() && ch.is_alphanumeric())
}
