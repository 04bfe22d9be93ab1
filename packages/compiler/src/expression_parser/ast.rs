/**
 * Template Expression AST
 *
 * ESTree-shaped syntax tree for template expressions. Node kinds form a
 * closed set of enum variants; serialization tags each node with its
 * ESTree `type` name.
 */

use serde::{Deserialize, Serialize};

use super::grammar::BindingContext;
use crate::parse_util::Span;

/// Root of a parsed expression program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Program")]
pub struct Program {
    pub body: Vec<Statement>,
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    ExpressionStatement(ExpressionStatement),
    ReturnStatement(ReturnStatement),
    FunctionDeclaration(Function),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub argument: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    pub body: Vec<Statement>,
    pub span: Span,
}

/// Expression node kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    Identifier(Identifier),
    Literal(Literal),
    ThisExpression(ThisExpression),
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    MemberExpression(MemberExpression),
    CallExpression(CallExpression),
    UnaryExpression(UnaryExpression),
    UpdateExpression(UpdateExpression),
    BinaryExpression(BinaryExpression),
    LogicalExpression(BinaryExpression),
    ConditionalExpression(ConditionalExpression),
    AssignmentExpression(AssignmentExpression),
    SequenceExpression(SequenceExpression),
    ArrowFunctionExpression(Function),
    FunctionExpression(Function),
}

/// Identifier reference or binding.
///
/// `name` is the lexical name (sigil included) until the classifier strips
/// it; `context` is set only on classified references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<BindingContext>,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Identifier {
            name: name.into(),
            context: None,
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: LiteralValue,
    pub raw: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThisExpression {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayExpression {
    pub elements: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectExpression {
    pub properties: Vec<Property>,
    pub span: Span,
}

/// Object literal entry. A non-computed `key` is an `Identifier` or
/// `Literal` naming the property; a computed key is any expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: Expr,
    pub value: Expr,
    pub computed: bool,
    pub shorthand: bool,
    pub span: Span,
}

/// `object.property`, `object[property]`, `object?.property`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpression {
    pub object: Box<Expr>,
    pub property: Box<Expr>,
    pub computed: bool,
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpression {
    pub operator: String,
    pub argument: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpression {
    pub operator: String,
    pub prefix: bool,
    pub argument: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub operator: String,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalExpression {
    pub test: Box<Expr>,
    pub consequent: Box<Expr>,
    pub alternate: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentExpression {
    pub operator: String,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceExpression {
    pub expressions: Vec<Expr>,
    pub span: Span,
}

/// Arrow function, function expression or function declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    pub params: Vec<Param>,
    pub body: FunctionBody,
    pub span: Span,
}

impl Function {
    /// Names bound by the parameter list
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|param| param.binding().name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Param {
    Identifier(Identifier),
    AssignmentPattern(AssignmentPattern),
}

impl Param {
    /// Identifier the parameter binds
    pub fn binding(&self) -> &Identifier {
        match self {
            Param::Identifier(id) => id,
            Param::AssignmentPattern(pattern) => &pattern.left,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Param::Identifier(id) => id.span,
            Param::AssignmentPattern(pattern) => pattern.span,
        }
    }
}

/// Parameter with a default value: `(a = 1) => a`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPattern {
    pub left: Identifier,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionBody {
    Expression(Box<Expr>),
    Block(BlockStatement),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::ExpressionStatement(s) => s.span,
            Statement::ReturnStatement(s) => s.span,
            Statement::FunctionDeclaration(f) => f.span,
        }
    }
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Identifier(e) => e.span,
            Expr::Literal(e) => e.span,
            Expr::ThisExpression(e) => e.span,
            Expr::ArrayExpression(e) => e.span,
            Expr::ObjectExpression(e) => e.span,
            Expr::MemberExpression(e) => e.span,
            Expr::CallExpression(e) => e.span,
            Expr::UnaryExpression(e) => e.span,
            Expr::UpdateExpression(e) => e.span,
            Expr::BinaryExpression(e) => e.span,
            Expr::LogicalExpression(e) => e.span,
            Expr::ConditionalExpression(e) => e.span,
            Expr::AssignmentExpression(e) => e.span,
            Expr::SequenceExpression(e) => e.span,
            Expr::ArrowFunctionExpression(e) => e.span,
            Expr::FunctionExpression(e) => e.span,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expr::Identifier(id) => Some(id),
            _ => None,
        }
    }

    /// Valid target of an assignment or update expression
    pub fn is_assignable(&self) -> bool {
        match self {
            Expr::Identifier(_) => true,
            Expr::MemberExpression(member) => !member.optional,
            _ => false,
        }
    }
}

impl Program {
    /// Every identifier in the tree, in source order
    pub fn identifiers(&self) -> Vec<&Identifier> {
        let mut out = Vec::new();
        for statement in &self.body {
            collect_statement(statement, &mut out);
        }
        out
    }
}

fn collect_statement<'a>(statement: &'a Statement, out: &mut Vec<&'a Identifier>) {
    match statement {
        Statement::ExpressionStatement(s) => collect_expr(&s.expression, out),
        Statement::ReturnStatement(s) => {
            if let Some(argument) = &s.argument {
                collect_expr(argument, out);
            }
        }
        Statement::FunctionDeclaration(f) => collect_function(f, out),
    }
}

fn collect_function<'a>(function: &'a Function, out: &mut Vec<&'a Identifier>) {
    if let Some(id) = &function.id {
        out.push(id);
    }
    for param in &function.params {
        match param {
            Param::Identifier(id) => out.push(id),
            Param::AssignmentPattern(pattern) => {
                out.push(&pattern.left);
                collect_expr(&pattern.right, out);
            }
        }
    }
    match &function.body {
        FunctionBody::Expression(expr) => collect_expr(expr, out),
        FunctionBody::Block(block) => {
            for statement in &block.body {
                collect_statement(statement, out);
            }
        }
    }
}

fn collect_expr<'a>(expr: &'a Expr, out: &mut Vec<&'a Identifier>) {
    match expr {
        Expr::Identifier(id) => out.push(id),
        Expr::Literal(_) | Expr::ThisExpression(_) => {}
        Expr::ArrayExpression(e) => e.elements.iter().for_each(|el| collect_expr(el, out)),
        Expr::ObjectExpression(e) => {
            for property in &e.properties {
                // Shorthand values repeat the key
                if !property.shorthand {
                    collect_expr(&property.key, out);
                }
                collect_expr(&property.value, out);
            }
        }
        Expr::MemberExpression(e) => {
            collect_expr(&e.object, out);
            collect_expr(&e.property, out);
        }
        Expr::CallExpression(e) => {
            collect_expr(&e.callee, out);
            e.arguments.iter().for_each(|arg| collect_expr(arg, out));
        }
        Expr::UnaryExpression(e) => collect_expr(&e.argument, out),
        Expr::UpdateExpression(e) => collect_expr(&e.argument, out),
        Expr::BinaryExpression(e) | Expr::LogicalExpression(e) => {
            collect_expr(&e.left, out);
            collect_expr(&e.right, out);
        }
        Expr::ConditionalExpression(e) => {
            collect_expr(&e.test, out);
            collect_expr(&e.consequent, out);
            collect_expr(&e.alternate, out);
        }
        Expr::AssignmentExpression(e) => {
            collect_expr(&e.left, out);
            collect_expr(&e.right, out);
        }
        Expr::SequenceExpression(e) => e.expressions.iter().for_each(|el| collect_expr(el, out)),
        Expr::ArrowFunctionExpression(f) | Expr::FunctionExpression(f) => collect_function(f, out),
    }
}
