/**
 * Template Expression Parser
 *
 * Recursive descent parser for template expressions. Tokens are moved into
 * document coordinates as the lexer emits them, so node spans and syntax
 * error positions always point into the enclosing template document.
 */
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ast::*;
use super::classifier::{classify, GlobalAllowList, HelperAllowList};
use super::grammar::Grammar;
use super::lexer::{Lexer, Token, TokenType};
use super::position::PositionTranslator;
use crate::error::{Result, SyntaxError};
use crate::parse_util::{OffsetDescriptor, ParseSourceFile, Position, SourceLocation, Span};

const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "^=", "|=", "&&=", "||=",
    "??=",
];

const PREFIX_OPERATORS: &[&str] = &["!", "-", "+", "~"];

/// Per-call parse options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Where the expression starts in the enclosing document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<OffsetDescriptor>,
    /// Document URL reported with syntax errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub helpers: HelperAllowList,
}

impl ParseOptions {
    pub fn new() -> Self {
        ParseOptions::default()
    }

    pub fn with_offset(mut self, offset: OffsetDescriptor) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_helpers(mut self, helpers: HelperAllowList) -> Self {
        self.helpers = helpers;
        self
    }
}

/// Parser for template expressions
#[derive(Debug, Clone, Default)]
pub struct Parser {
    lexer: Lexer,
    globals: GlobalAllowList,
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.lexer = Lexer::new(grammar);
        self
    }

    pub fn with_globals(mut self, globals: GlobalAllowList) -> Self {
        self.globals = globals;
        self
    }

    pub fn grammar(&self) -> Grammar {
        self.lexer.grammar()
    }

    pub fn globals(&self) -> &GlobalAllowList {
        &self.globals
    }

    /// Parse `code` into a program without classifying identifiers
    pub fn parse_program(&self, code: &str, options: &ParseOptions) -> Result<Program> {
        let translator = PositionTranslator::new(options.offset);
        let tokens = self
            .lexer
            .tokenize_with(code, |token| translator.translate_token(token));

        let file = ParseSourceFile::new(code.to_string(), options.url.clone());
        let length = code.chars().count();
        let end = file.position_at(length);
        let span = translator.translate_span(Span::new(
            0,
            length,
            SourceLocation::new(Position::start(), end),
        ));
        let eof = translator.translate_span(Span::new(length, length, SourceLocation::new(end, end)));

        let mut parse_ast = ParseAST::new(code, translator.translate_offset(0), tokens, eof);
        let body = parse_ast
            .parse_program()
            .map_err(|err| err.with_url(file.url.clone()))?;

        Ok(Program {
            body,
            span,
            source_file: file.url,
        })
    }

    /// Parse `code` and annotate every identifier with its binding context
    pub fn parse_js(&self, code: &str, options: &ParseOptions) -> Result<Program> {
        debug!(
            length = code.len(),
            offset = ?options.offset,
            helpers = options.helpers.len(),
            "parsing expression"
        );
        let mut program = self.parse_program(code, options)?;
        classify(&mut program, &self.globals, &options.helpers);
        Ok(program)
    }
}

/// Parse and classify `code` with the template grammar and default globals
pub fn parse_js(code: &str, options: &ParseOptions) -> Result<Program> {
    Parser::new().parse_js(code, options)
}

/// Internal parser state
struct ParseAST {
    input: Vec<char>,
    /// Document offset of the first input character
    base: usize,
    tokens: Vec<Token>,
    index: usize,
    eof: Span,
    function_depth: usize,
}

impl ParseAST {
    fn new(input: &str, base: usize, tokens: Vec<Token>, eof: Span) -> Self {
        ParseAST {
            input: input.chars().collect(),
            base,
            tokens,
            index: 0,
            eof,
            function_depth: 0,
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.index + offset)
    }

    fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn next_is_character(&self, code: char) -> bool {
        self.current().is_some_and(|token| token.is_character(code))
    }

    fn next_is_operator(&self, op: &str) -> bool {
        self.current().is_some_and(|token| token.is_operator(op))
    }

    fn next_is_keyword(&self, keyword: &str) -> bool {
        self.current().is_some_and(|token| token.is_keyword(keyword))
    }

    fn consume_optional_character(&mut self, code: char) -> bool {
        if self.next_is_character(code) {
            self.advance();
            return true;
        }
        false
    }

    fn consume_optional_operator(&mut self, op: &str) -> bool {
        if self.next_is_operator(op) {
            self.advance();
            return true;
        }
        false
    }

    fn expect_character(&mut self, code: char) -> Result<Span> {
        let span = self.current_span();
        if self.consume_optional_character(code) {
            Ok(span)
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_operator(&mut self, op: &str) -> Result<()> {
        if self.consume_optional_operator(op) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn consume_identifier(&mut self) -> Option<Identifier> {
        let token = self.current().filter(|token| token.is_identifier())?;
        let id = Identifier::new(token.str_value.clone(), token.span);
        self.advance();
        Some(id)
    }

    fn current_span(&self) -> Span {
        self.current().map_or(self.eof, |token| token.span)
    }

    fn prev_span(&self) -> Span {
        match self.index.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => self.eof,
        }
    }

    /// Span from `start` to the end of the last consumed token
    fn finish(&self, start: Span) -> Span {
        start.to(&self.prev_span())
    }

    /// Source text covered by a (translated) span
    fn raw(&self, span: Span) -> String {
        let start = span.start.saturating_sub(self.base);
        let end = span.end.saturating_sub(self.base);
        self.input
            .get(start..end)
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }

    fn unexpected(&self) -> SyntaxError {
        match self.current() {
            Some(token) if token.is_error() => {
                SyntaxError::new(token.str_value.clone(), token.start(), token.span.loc.start)
            }
            Some(token) => SyntaxError::new("Unexpected token", token.start(), token.span.loc.start),
            None => SyntaxError::new("Unexpected token", self.eof.start, self.eof.loc.start),
        }
    }

    fn parse_program(&mut self) -> Result<Vec<Statement>> {
        let mut body = Vec::new();
        while !self.at_end() {
            if self.consume_optional_character(';') {
                continue;
            }
            body.push(self.parse_statement()?);
        }
        Ok(body)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        if self.next_is_keyword("function") {
            return Ok(Statement::FunctionDeclaration(self.parse_function(true)?));
        }
        if self.next_is_keyword("return") {
            return self.parse_return();
        }

        let start = self.current_span();
        let expression = self.parse_expression()?;
        self.consume_statement_end()?;
        Ok(Statement::ExpressionStatement(ExpressionStatement {
            expression,
            span: self.finish(start),
        }))
    }

    /// `;`, end of input, end of block or a line break ends a statement
    fn consume_statement_end(&mut self) -> Result<()> {
        if self.consume_optional_character(';') {
            return Ok(());
        }
        match self.current() {
            None => Ok(()),
            Some(token) if token.is_character('}') && self.function_depth > 0 => Ok(()),
            Some(token) if token.newline_before => Ok(()),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn parse_return(&mut self) -> Result<Statement> {
        let start = self.current_span();
        if self.function_depth == 0 {
            return Err(SyntaxError::new(
                "'return' outside of function",
                start.start,
                start.loc.start,
            ));
        }
        self.advance();

        let has_argument = self.current().is_some_and(|token| {
            !token.is_character(';') && !token.is_character('}') && !token.newline_before
        });
        let argument = if has_argument {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.consume_statement_end()?;

        Ok(Statement::ReturnStatement(ReturnStatement {
            argument,
            span: self.finish(start),
        }))
    }

    /// `function name(params) { ... }`; the name is required for declarations
    fn parse_function(&mut self, declaration: bool) -> Result<Function> {
        let start = self.current_span();
        self.advance(); // `function`

        let id = self.consume_identifier();
        if declaration && id.is_none() {
            return Err(self.unexpected());
        }
        let params = self.parse_params()?;
        let body = FunctionBody::Block(self.parse_function_body()?);

        Ok(Function {
            id,
            params,
            body,
            span: self.finish(start),
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Param>> {
        self.expect_character('(')?;
        let mut params = Vec::new();
        while !self.consume_optional_character(')') {
            let Some(left) = self.consume_identifier() else {
                return Err(self.unexpected());
            };
            let param = if self.consume_optional_operator("=") {
                let right = self.parse_assignment()?;
                let span = left.span.to(&right.span());
                Param::AssignmentPattern(AssignmentPattern {
                    left,
                    right: Box::new(right),
                    span,
                })
            } else {
                Param::Identifier(left)
            };
            params.push(param);

            if !self.consume_optional_character(',') {
                self.expect_character(')')?;
                break;
            }
        }
        Ok(params)
    }

    fn parse_function_body(&mut self) -> Result<BlockStatement> {
        let start = self.expect_character('{')?;
        self.function_depth += 1;

        let mut body = Vec::new();
        while !self.consume_optional_character('}') {
            if self.at_end() {
                return Err(self.unexpected());
            }
            if self.consume_optional_character(';') {
                continue;
            }
            body.push(self.parse_statement()?);
        }

        self.function_depth -= 1;
        Ok(BlockStatement {
            body,
            span: self.finish(start),
        })
    }

    /// Comma-separated sequence of assignment expressions
    fn parse_expression(&mut self) -> Result<Expr> {
        let first = self.parse_assignment()?;
        if !self.next_is_character(',') {
            return Ok(first);
        }

        let start = first.span();
        let mut expressions = vec![first];
        while self.consume_optional_character(',') {
            expressions.push(self.parse_assignment()?);
        }
        Ok(Expr::SequenceExpression(SequenceExpression {
            expressions,
            span: self.finish(start),
        }))
    }

    /// Parse assignment (e.g., `a = b`, `a += 1`) or an arrow function
    fn parse_assignment(&mut self) -> Result<Expr> {
        if self.is_arrow_ahead() {
            return self.parse_arrow_function();
        }

        let left = self.parse_conditional()?;
        let operator = self
            .current()
            .filter(|token| ASSIGNMENT_OPERATORS.iter().any(|op| token.is_operator(op)))
            .map(|token| token.str_value.clone());
        let Some(operator) = operator else {
            return Ok(left);
        };

        check_assignable(&left)?;
        self.advance();
        let right = self.parse_assignment()?;
        Ok(Expr::AssignmentExpression(AssignmentExpression {
            operator,
            span: left.span().to(&right.span()),
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    /// `x =>` or a parenthesised list whose closing paren is followed by `=>`
    fn is_arrow_ahead(&self) -> bool {
        let Some(token) = self.current() else {
            return false;
        };
        if token.is_identifier() {
            return self.peek(1).is_some_and(|next| next.is_operator("=>"));
        }
        if !token.is_character('(') {
            return false;
        }

        let mut depth = 0usize;
        for (offset, token) in self.tokens[self.index..].iter().enumerate() {
            if token.is_character('(') {
                depth += 1;
            } else if token.is_character(')') {
                depth -= 1;
                if depth == 0 {
                    return self.peek(offset + 1).is_some_and(|next| next.is_operator("=>"));
                }
            }
        }
        false
    }

    fn parse_arrow_function(&mut self) -> Result<Expr> {
        let start = self.current_span();
        let params = if self.next_is_character('(') {
            self.parse_params()?
        } else {
            match self.consume_identifier() {
                Some(id) => vec![Param::Identifier(id)],
                None => return Err(self.unexpected()),
            }
        };
        self.expect_operator("=>")?;

        let body = if self.next_is_character('{') {
            FunctionBody::Block(self.parse_function_body()?)
        } else {
            FunctionBody::Expression(Box::new(self.parse_assignment()?))
        };

        Ok(Expr::ArrowFunctionExpression(Function {
            id: None,
            params,
            body,
            span: self.finish(start),
        }))
    }

    /// Parse conditional/ternary expression (e.g., `a ? b : c`)
    fn parse_conditional(&mut self) -> Result<Expr> {
        let test = self.parse_logical_or()?;
        if !self.consume_optional_operator("?") {
            return Ok(test);
        }

        let consequent = self.parse_assignment()?;
        self.expect_character(':')?;
        let alternate = self.parse_assignment()?;
        Ok(Expr::ConditionalExpression(ConditionalExpression {
            span: test.span().to(&alternate.span()),
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }))
    }

    fn parse_logical_or(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["||", "??"], true, Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["&&"], true, Self::parse_bitwise_or)
    }

    fn parse_bitwise_or(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["|"], false, Self::parse_bitwise_xor)
    }

    fn parse_bitwise_xor(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["^"], false, Self::parse_bitwise_and)
    }

    fn parse_bitwise_and(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["&"], false, Self::parse_equality)
    }

    /// Parse equality operators (==, !=, ===, !==)
    fn parse_equality(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["==", "!=", "===", "!=="], false, Self::parse_relational)
    }

    /// Parse relational operators (<, >, <=, >=, in, instanceof)
    fn parse_relational(&mut self) -> Result<Expr> {
        self.parse_binary_level(
            &["<", ">", "<=", ">=", "in", "instanceof"],
            false,
            Self::parse_shift,
        )
    }

    fn parse_shift(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["<<", ">>", ">>>"], false, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["+", "-"], false, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["*", "/", "%"], false, Self::parse_exponentiation)
    }

    /// Left-associative binary level
    fn parse_binary_level(
        &mut self,
        operators: &[&str],
        logical: bool,
        next: fn(&mut Self) -> Result<Expr>,
    ) -> Result<Expr> {
        let mut result = next(self)?;
        while let Some(operator) = self.binary_operator(operators) {
            self.advance();
            let right = next(self)?;
            result = binary(operator, result, right, logical);
        }
        Ok(result)
    }

    fn binary_operator(&self, operators: &[&str]) -> Option<String> {
        let token = self.current()?;
        let is_operator = matches!(token.token_type, TokenType::Operator | TokenType::Keyword);
        (is_operator && operators.contains(&token.str_value.as_str()))
            .then(|| token.str_value.clone())
    }

    /// Parse exponentiation operator (**), right-associative
    fn parse_exponentiation(&mut self) -> Result<Expr> {
        let left = self.parse_prefix()?;
        if !self.consume_optional_operator("**") {
            return Ok(left);
        }
        let right = self.parse_exponentiation()?;
        Ok(binary("**".to_string(), left, right, false))
    }

    /// Parse prefix operators (!, -, +, ~, typeof, void, ++, --)
    fn parse_prefix(&mut self) -> Result<Expr> {
        let start = self.current_span();
        let Some(token) = self.current() else {
            return self.parse_postfix();
        };

        if token.is_operator("++") || token.is_operator("--") {
            let operator = token.str_value.clone();
            self.advance();
            let argument = self.parse_prefix()?;
            check_assignable(&argument)?;
            return Ok(Expr::UpdateExpression(UpdateExpression {
                operator,
                prefix: true,
                argument: Box::new(argument),
                span: self.finish(start),
            }));
        }

        let is_unary = PREFIX_OPERATORS.iter().any(|op| token.is_operator(op))
            || token.is_keyword("typeof")
            || token.is_keyword("void");
        if is_unary {
            let operator = token.str_value.clone();
            self.advance();
            let argument = self.parse_prefix()?;
            return Ok(Expr::UnaryExpression(UnaryExpression {
                operator,
                argument: Box::new(argument),
                span: self.finish(start),
            }));
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let expr = self.parse_call_chain()?;
        let operator = self
            .current()
            .filter(|token| {
                (token.is_operator("++") || token.is_operator("--")) && !token.newline_before
            })
            .map(|token| token.str_value.clone());
        let Some(operator) = operator else {
            return Ok(expr);
        };

        check_assignable(&expr)?;
        self.advance();
        Ok(Expr::UpdateExpression(UpdateExpression {
            operator,
            prefix: false,
            span: self.finish(expr.span()),
            argument: Box::new(expr),
        }))
    }

    /// Parse call chain (handles property access, calls, optional chaining)
    fn parse_call_chain(&mut self) -> Result<Expr> {
        let mut result = self.parse_primary()?;

        loop {
            let start = result.span();
            if self.consume_optional_character('.') {
                let property = self.parse_property_name()?;
                result = self.member(result, property, false, false, start);
            } else if self.consume_optional_operator("?.") {
                if self.next_is_character('(') {
                    let arguments = self.parse_call_arguments()?;
                    result = self.call(result, arguments, true, start);
                } else if self.consume_optional_character('[') {
                    let property = self.parse_expression()?;
                    self.expect_character(']')?;
                    result = self.member(result, property, true, true, start);
                } else {
                    let property = self.parse_property_name()?;
                    result = self.member(result, property, false, true, start);
                }
            } else if self.consume_optional_character('[') {
                let property = self.parse_expression()?;
                self.expect_character(']')?;
                result = self.member(result, property, true, false, start);
            } else if self.next_is_character('(') {
                let arguments = self.parse_call_arguments()?;
                result = self.call(result, arguments, false, start);
            } else {
                break;
            }
        }

        Ok(result)
    }

    fn member(&self, object: Expr, property: Expr, computed: bool, optional: bool, start: Span) -> Expr {
        Expr::MemberExpression(MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed,
            optional,
            span: self.finish(start),
        })
    }

    fn call(&self, callee: Expr, arguments: Vec<Expr>, optional: bool, start: Span) -> Expr {
        Expr::CallExpression(CallExpression {
            callee: Box::new(callee),
            arguments,
            optional,
            span: self.finish(start),
        })
    }

    /// Name after `.`; reserved words are valid property names
    fn parse_property_name(&mut self) -> Result<Expr> {
        let id = self
            .current()
            .filter(|token| token.is_identifier() || token.is_any_keyword())
            .map(|token| Identifier::new(token.str_value.clone(), token.span));
        match id {
            Some(id) => {
                self.advance();
                Ok(Expr::Identifier(id))
            }
            None => Err(self.unexpected()),
        }
    }

    /// Parse call arguments (arg1, arg2, ...)
    fn parse_call_arguments(&mut self) -> Result<Vec<Expr>> {
        self.expect_character('(')?;
        let mut arguments = Vec::new();
        while !self.consume_optional_character(')') {
            arguments.push(self.parse_assignment()?);
            if !self.consume_optional_character(',') {
                self.expect_character(')')?;
                break;
            }
        }
        Ok(arguments)
    }

    /// Parse primary expression (literals, identifiers, parentheses, arrays, objects)
    fn parse_primary(&mut self) -> Result<Expr> {
        let Some(token) = self.current() else {
            return Err(self.unexpected());
        };
        let span = token.span;

        match token.token_type {
            TokenType::Identifier => {
                let id = Identifier::new(token.str_value.clone(), span);
                self.advance();
                Ok(Expr::Identifier(id))
            }
            TokenType::Number => {
                let value = LiteralValue::Number(token.num_value);
                self.advance();
                Ok(self.literal(value, span))
            }
            TokenType::String => {
                let value = LiteralValue::String(token.str_value.clone());
                self.advance();
                Ok(self.literal(value, span))
            }
            TokenType::Keyword => match token.str_value.as_str() {
                "true" | "false" => {
                    let value = LiteralValue::Boolean(token.str_value == "true");
                    self.advance();
                    Ok(self.literal(value, span))
                }
                "null" => {
                    self.advance();
                    Ok(self.literal(LiteralValue::Null, span))
                }
                "this" => {
                    self.advance();
                    Ok(Expr::ThisExpression(ThisExpression { span }))
                }
                "function" => Ok(Expr::FunctionExpression(self.parse_function(false)?)),
                _ => Err(self.unexpected()),
            },
            TokenType::Character if token.is_character('(') => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_character(')')?;
                Ok(expr)
            }
            TokenType::Character if token.is_character('[') => self.parse_literal_array(),
            TokenType::Character if token.is_character('{') => self.parse_literal_object(),
            _ => Err(self.unexpected()),
        }
    }

    fn literal(&self, value: LiteralValue, span: Span) -> Expr {
        Expr::Literal(Literal {
            value,
            raw: self.raw(span),
            span,
        })
    }

    /// Parse array literal [1, 2, 3]
    fn parse_literal_array(&mut self) -> Result<Expr> {
        let start = self.expect_character('[')?;
        let mut elements = Vec::new();
        while !self.consume_optional_character(']') {
            elements.push(self.parse_assignment()?);
            if !self.consume_optional_character(',') {
                self.expect_character(']')?;
                break;
            }
        }
        Ok(Expr::ArrayExpression(ArrayExpression {
            elements,
            span: self.finish(start),
        }))
    }

    /// Parse object literal {a: 1, b, [c]: 2}
    fn parse_literal_object(&mut self) -> Result<Expr> {
        let start = self.expect_character('{')?;
        let mut properties = Vec::new();
        while !self.consume_optional_character('}') {
            properties.push(self.parse_property()?);
            if !self.consume_optional_character(',') {
                self.expect_character('}')?;
                break;
            }
        }
        Ok(Expr::ObjectExpression(ObjectExpression {
            properties,
            span: self.finish(start),
        }))
    }

    fn parse_property(&mut self) -> Result<Property> {
        let start = self.current_span();
        if self.consume_optional_character('[') {
            let key = self.parse_assignment()?;
            self.expect_character(']')?;
            self.expect_character(':')?;
            let value = self.parse_assignment()?;
            return Ok(Property {
                key,
                value,
                computed: true,
                shorthand: false,
                span: self.finish(start),
            });
        }

        let Some(token) = self.current() else {
            return Err(self.unexpected());
        };
        let span = token.span;
        let (key, shorthand_allowed) = match token.token_type {
            TokenType::Identifier => (
                Expr::Identifier(Identifier::new(token.str_value.clone(), span)),
                true,
            ),
            TokenType::Keyword => (
                Expr::Identifier(Identifier::new(token.str_value.clone(), span)),
                false,
            ),
            TokenType::String => (
                self.literal(LiteralValue::String(token.str_value.clone()), span),
                false,
            ),
            TokenType::Number => (self.literal(LiteralValue::Number(token.num_value), span), false),
            _ => return Err(self.unexpected()),
        };
        self.advance();

        if self.consume_optional_character(':') {
            let value = self.parse_assignment()?;
            return Ok(Property {
                key,
                value,
                computed: false,
                shorthand: false,
                span: self.finish(start),
            });
        }

        if shorthand_allowed && (self.next_is_character(',') || self.next_is_character('}')) {
            let value = key.clone();
            return Ok(Property {
                key,
                value,
                computed: false,
                shorthand: true,
                span,
            });
        }

        Err(self.unexpected())
    }
}

fn binary(operator: String, left: Expr, right: Expr, logical: bool) -> Expr {
    let node = BinaryExpression {
        operator,
        span: left.span().to(&right.span()),
        left: Box::new(left),
        right: Box::new(right),
    };
    if logical {
        Expr::LogicalExpression(node)
    } else {
        Expr::BinaryExpression(node)
    }
}

fn check_assignable(expr: &Expr) -> Result<()> {
    if expr.is_assignable() {
        return Ok(());
    }
    let span = expr.span();
    Err(SyntaxError::new("Assigning to rvalue", span.start, span.loc.start))
}
