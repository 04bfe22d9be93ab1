/**
 * Template Expression Lexer
 *
 * Tokenizes template expressions. Which characters may start an identifier
 * is decided by the [`Grammar`] the lexer is built with, so the same
 * scanner serves plain JavaScript expressions and sigil-prefixed ones.
 */

use serde::{Deserialize, Serialize};

use super::grammar::Grammar;
use crate::chars;
use crate::parse_util::{Position, SourceLocation, Span};

/// Token types in template expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    Character = 0,
    Identifier = 1,
    Keyword = 2,
    String = 3,
    Operator = 4,
    Number = 5,
    Error = 6,
}

/// Token representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub span: Span,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
    /// A line terminator separates this token from the previous one
    pub newline_before: bool,
}

impl Token {
    pub fn new(span: Span, token_type: TokenType, num_value: f64, str_value: String) -> Self {
        Token {
            span,
            token_type,
            num_value,
            str_value,
            newline_before: false,
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(code)
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == keyword
    }

    pub fn is_any_keyword(&self) -> bool {
        self.token_type == TokenType::Keyword
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.token_type {
            TokenType::Number => write!(f, "{}", self.num_value),
            TokenType::String => write!(f, "{:?}", self.str_value),
            _ => f.write_str(&self.str_value),
        }
    }
}

// Reserved words of the expression language
const KEYWORDS: &[&str] = &[
    "true", "false", "null", "this", "typeof", "void", "in", "instanceof", "function", "return",
];

// Longest match first
const OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==", "!=", "<=",
    ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "**",
    "<<", ">>", "+", "-", "*", "/", "%", "<", ">", "=", "!", "~", "&", "|", "^", "?",
];

/// Template expression lexer
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexer {
    grammar: Grammar,
}

impl Lexer {
    pub fn new(grammar: Grammar) -> Self {
        Lexer { grammar }
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenize_with(text, |_| {})
    }

    /// Tokenize `text`, handing every token to `on_token` as it is emitted
    pub fn tokenize_with<F>(&self, text: &str, on_token: F) -> Vec<Token>
    where
        F: FnMut(&mut Token),
    {
        Scanner::new(text, self.grammar, on_token).scan()
    }
}

/// Scanner for tokenizing input
struct Scanner<F> {
    input: Vec<char>,
    grammar: Grammar,
    on_token: F,
    index: usize,
    peek: char,
    prev: char,
    position: Position,
    tokens: Vec<Token>,
}

impl<F: FnMut(&mut Token)> Scanner<F> {
    fn new(input: &str, grammar: Grammar, on_token: F) -> Self {
        let input: Vec<char> = input.chars().collect();
        let peek = input.first().copied().unwrap_or(chars::EOF);
        Scanner {
            input,
            grammar,
            on_token,
            index: 0,
            peek,
            prev: chars::EOF,
            position: Position::start(),
            tokens: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<Token> {
        loop {
            let (newline_before, mut token) = match self.skip_trivia() {
                Ok(_) if self.index >= self.input.len() => break,
                Ok(newline_before) => (newline_before, self.scan_token()),
                Err(token) => (false, token),
            };
            token.newline_before = newline_before;
            let stop = token.is_error();
            (self.on_token)(&mut token);
            self.tokens.push(token);
            if stop {
                break;
            }
        }
        self.tokens
    }

    fn char_at(&self, index: usize) -> char {
        self.input.get(index).copied().unwrap_or(chars::EOF)
    }

    fn advance(&mut self) {
        if self.index >= self.input.len() {
            return;
        }
        self.position = self.position.advance(self.peek, self.prev);
        self.prev = self.peek;
        self.index += 1;
        self.peek = self.char_at(self.index);
    }

    fn text(&self, start: usize) -> String {
        self.input[start..self.index].iter().collect()
    }

    fn span(&self, start: usize, start_position: Position) -> Span {
        Span::new(
            start,
            self.index,
            SourceLocation::new(start_position, self.position),
        )
    }

    /// Skip whitespace and comments, reporting whether a line break was seen.
    ///
    /// A block comment without `*/` yields an error token instead.
    fn skip_trivia(&mut self) -> Result<bool, Token> {
        let mut newline = false;
        loop {
            if chars::is_whitespace(self.peek) && self.index < self.input.len() {
                newline |= chars::is_new_line(self.peek);
                self.advance();
            } else if self.peek == chars::SLASH && self.char_at(self.index + 1) == chars::SLASH {
                while self.index < self.input.len() && !chars::is_new_line(self.peek) {
                    self.advance();
                }
            } else if self.peek == chars::SLASH && self.char_at(self.index + 1) == chars::STAR {
                let start = self.index;
                let start_position = self.position;
                self.advance();
                self.advance();
                while !(self.peek == chars::STAR && self.char_at(self.index + 1) == chars::SLASH) {
                    if self.index >= self.input.len() {
                        return Err(self.error(
                            start,
                            start_position,
                            "Unterminated comment".to_string(),
                        ));
                    }
                    newline |= chars::is_new_line(self.peek);
                    self.advance();
                }
                self.advance();
                self.advance();
            } else {
                return Ok(newline);
            }
        }
    }

    fn scan_token(&mut self) -> Token {
        let start = self.index;
        let start_position = self.position;
        let ch = self.peek;

        if let Some(sigil) = self.grammar.sigil_prefix(ch) {
            if chars::is_identifier_start(self.char_at(self.index + 1)) {
                self.advance();
                return self.scan_identifier(start, start_position, true);
            }
            self.advance();
            return self.error(
                start,
                start_position,
                format!("Expected identifier after '{}'", sigil.as_char()),
            );
        }

        if chars::is_identifier_start(ch) {
            return self.scan_identifier(start, start_position, false);
        }

        if chars::is_digit(ch) || (ch == chars::PERIOD && chars::is_digit(self.char_at(self.index + 1))) {
            return self.scan_number(start, start_position);
        }

        match ch {
            chars::PERIOD
            | chars::LPAREN
            | chars::RPAREN
            | chars::LBRACKET
            | chars::RBRACKET
            | chars::LBRACE
            | chars::RBRACE
            | chars::COMMA
            | chars::COLON
            | chars::SEMICOLON => {
                self.advance();
                Token::new(
                    self.span(start, start_position),
                    TokenType::Character,
                    ch as u32 as f64,
                    ch.to_string(),
                )
            }
            chars::SQ | chars::DQ => self.scan_string(start, start_position, ch),
            _ => self.scan_operator(start, start_position),
        }
    }

    fn scan_identifier(&mut self, start: usize, start_position: Position, sigil: bool) -> Token {
        self.advance();
        while self.index < self.input.len() && chars::is_identifier_part(self.peek) {
            self.advance();
        }

        let str_value = self.text(start);
        let token_type = if !sigil && KEYWORDS.contains(&str_value.as_str()) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };

        Token::new(self.span(start, start_position), token_type, 0.0, str_value)
    }

    fn scan_number(&mut self, start: usize, start_position: Position) -> Token {
        if self.peek == '0' {
            let radix = match self.char_at(self.index + 1) {
                'x' | 'X' => Some(16),
                'o' | 'O' => Some(8),
                'b' | 'B' => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                return self.scan_radix_number(start, start_position, radix);
            }
        }

        while chars::is_digit(self.peek) {
            self.advance();
        }
        if self.peek == chars::PERIOD {
            self.advance();
            while chars::is_digit(self.peek) {
                self.advance();
            }
        }
        if self.peek == 'e' || self.peek == 'E' {
            self.advance();
            if self.peek == chars::PLUS || self.peek == chars::MINUS {
                self.advance();
            }
            if !chars::is_digit(self.peek) {
                return self.error(start, start_position, "Invalid number".to_string());
            }
            while chars::is_digit(self.peek) {
                self.advance();
            }
        }
        if chars::is_identifier_start(self.peek) {
            return self.error(
                start,
                start_position,
                "Identifier directly after number".to_string(),
            );
        }

        let str_value = self.text(start);
        match str_value.parse::<f64>() {
            Ok(num_value) => Token::new(
                self.span(start, start_position),
                TokenType::Number,
                num_value,
                str_value,
            ),
            Err(_) => self.error(start, start_position, "Invalid number".to_string()),
        }
    }

    /// `0x`, `0o` and `0b` literals
    fn scan_radix_number(&mut self, start: usize, start_position: Position, radix: u32) -> Token {
        self.advance();
        self.advance();

        let mut num_value = 0.0;
        let digits_start = self.index;
        while let Some(digit) = self.peek.to_digit(radix) {
            num_value = num_value * f64::from(radix) + f64::from(digit);
            self.advance();
        }
        if self.index == digits_start || chars::is_identifier_part(self.peek) {
            return self.error(start, start_position, "Invalid number".to_string());
        }

        Token::new(
            self.span(start, start_position),
            TokenType::Number,
            num_value,
            self.text(start),
        )
    }

    fn scan_string(&mut self, start: usize, start_position: Position, quote: char) -> Token {
        self.advance(); // Skip opening quote

        let mut buffer = String::new();
        while self.index < self.input.len() {
            let ch = self.peek;
            if ch == quote {
                self.advance();
                return Token::new(
                    self.span(start, start_position),
                    TokenType::String,
                    0.0,
                    buffer,
                );
            }
            if chars::is_new_line(ch) {
                break;
            }
            if ch == chars::BACKSLASH {
                self.advance();
                let escaped = self.peek;
                if escaped == 'u' {
                    self.advance();
                    let hex_start = self.index;
                    while self.index - hex_start < 4 && chars::is_ascii_hex_digit(self.peek) {
                        self.advance();
                    }
                    let hex = self.text(hex_start);
                    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        Some(c) if hex.len() == 4 => buffer.push(c),
                        _ => {
                            return self.error(
                                start,
                                start_position,
                                format!("Invalid unicode escape [\\u{}]", hex),
                            )
                        }
                    }
                    continue;
                }
                if escaped == 'x' {
                    self.advance();
                    let hex_start = self.index;
                    while self.index - hex_start < 2 && chars::is_ascii_hex_digit(self.peek) {
                        self.advance();
                    }
                    let hex = self.text(hex_start);
                    match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                        Some(c) if hex.len() == 2 => buffer.push(c),
                        _ => {
                            return self.error(
                                start,
                                start_position,
                                format!("Invalid hexadecimal escape [\\x{}]", hex),
                            )
                        }
                    }
                    continue;
                }
                buffer.push(match escaped {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'b' => '\x08',
                    'f' => '\x0c',
                    'v' => '\x0b',
                    '0' => '\0',
                    _ => escaped,
                });
                self.advance();
            } else {
                buffer.push(ch);
                self.advance();
            }
        }

        self.error(start, start_position, "Unterminated string constant".to_string())
    }

    fn scan_operator(&mut self, start: usize, start_position: Position) -> Token {
        let rest = &self.input[self.index..];
        let matched = OPERATORS.iter().find(|op| {
            let len = op.chars().count();
            rest.len() >= len && op.chars().zip(rest.iter()).all(|(a, b)| a == *b)
        });

        let Some(&operator) = matched else {
            let ch = self.peek;
            self.advance();
            return self.error(start, start_position, format!("Unexpected character '{}'", ch));
        };

        // `a?.5:b` is a conditional, not an optional chain
        let operator = if operator == "?." && chars::is_digit(self.char_at(self.index + 2)) {
            "?"
        } else {
            operator
        };

        for _ in 0..operator.chars().count() {
            self.advance();
        }
        Token::new(
            self.span(start, start_position),
            TokenType::Operator,
            0.0,
            operator.to_string(),
        )
    }

    fn error(&mut self, start: usize, start_position: Position, message: String) -> Token {
        if self.index == start {
            self.advance();
        }
        Token::new(self.span(start, start_position), TokenType::Error, 0.0, message)
    }
}
