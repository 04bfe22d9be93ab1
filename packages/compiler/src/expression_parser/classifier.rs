/**
 * Identifier Classifier
 *
 * Walks a parsed program once and tags every identifier reference with the
 * binding context it resolves against: sigil-prefixed names lose their
 * sigil and become state, variable or store references; bare names become
 * helpers when the caller registered them, plain properties otherwise.
 * Globals and scope-excluded occurrences are left untouched.
 */

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::ast::*;
use super::grammar::{split_sigil, BindingContext};
use super::scope::{is_excluded, AncestorChain, NodeKind, Slot};
use crate::parse_util::Span;

/// Global symbols that are never reclassified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalAllowList(IndexSet<String>);

impl GlobalAllowList {
    pub const DEFAULT_GLOBALS: [&'static str; 4] = ["Math", "String", "Boolean", "Object"];

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GlobalAllowList(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for GlobalAllowList {
    fn default() -> Self {
        GlobalAllowList::new(Self::DEFAULT_GLOBALS)
    }
}

/// Helper function names registered by the caller for one parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HelperAllowList(IndexSet<String>);

impl HelperAllowList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HelperAllowList(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for HelperAllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        HelperAllowList::new(iter)
    }
}

impl<S: Into<String>> Extend<S> for HelperAllowList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// Annotate every identifier of `program` with its binding context
pub fn classify(program: &mut Program, globals: &GlobalAllowList, helpers: &HelperAllowList) {
    let mut classifier = Classifier::new(globals, helpers);
    classifier.chain.push(NodeKind::Other);
    for statement in &mut program.body {
        classifier.visit_statement(statement);
    }
    classifier.chain.pop();
}

/// Annotate a standalone expression; the expression root has no ancestors
pub fn classify_expression(expr: &mut Expr, globals: &GlobalAllowList, helpers: &HelperAllowList) {
    Classifier::new(globals, helpers).visit_expr(expr);
}

/// Context for an identifier name that is not excluded
pub fn resolve_context<'n>(name: &'n str, helpers: &HelperAllowList) -> (BindingContext, &'n str) {
    match split_sigil(name) {
        (Some(sigil), bare) => (sigil.context(), bare),
        (None, name) if helpers.contains(name) => (BindingContext::Helper, name),
        (None, name) => (BindingContext::Property, name),
    }
}

struct Classifier<'a> {
    globals: &'a GlobalAllowList,
    helpers: &'a HelperAllowList,
    chain: AncestorChain,
}

impl<'a> Classifier<'a> {
    fn new(globals: &'a GlobalAllowList, helpers: &'a HelperAllowList) -> Self {
        Classifier {
            globals,
            helpers,
            chain: AncestorChain::new(),
        }
    }

    fn visit_identifier(&mut self, id: &mut Identifier) {
        if self.globals.contains(&id.name) {
            return;
        }
        if is_excluded(&id.name, &self.chain) {
            trace!(name = %id.name, start = id.span.start, "identifier excluded by scope");
            return;
        }

        let (context, name) = resolve_context(&id.name, self.helpers);
        trace!(name, %context, start = id.span.start, "classified identifier");
        id.name = name.to_string();
        id.context = Some(context);
    }

    fn visit_child(&mut self, slot: Slot, expr: &mut Expr) {
        self.chain.set_slot(slot);
        self.visit_expr(expr);
    }

    fn visit_statement(&mut self, statement: &mut Statement) {
        match statement {
            Statement::ExpressionStatement(s) => {
                self.chain.push(NodeKind::Other);
                self.visit_child(Slot::Other, &mut s.expression);
                self.chain.pop();
            }
            Statement::ReturnStatement(s) => {
                if let Some(argument) = &mut s.argument {
                    self.chain.push(NodeKind::Other);
                    self.visit_child(Slot::Other, argument);
                    self.chain.pop();
                }
            }
            Statement::FunctionDeclaration(f) => self.visit_function(f),
        }
    }

    fn visit_function(&mut self, function: &mut Function) {
        let params = function.param_names().map(str::to_string).collect();
        self.chain.push(NodeKind::Function(params));

        // Function names are bindings, not references
        for param in &mut function.params {
            self.chain.set_slot(Slot::Param);
            match param {
                Param::Identifier(id) => self.visit_identifier(id),
                Param::AssignmentPattern(pattern) => {
                    self.chain.push(NodeKind::Assignment);
                    self.chain.set_slot(Slot::Left);
                    self.visit_identifier(&mut pattern.left);
                    self.visit_child(Slot::Right, &mut pattern.right);
                    self.chain.pop();
                }
            }
        }

        self.chain.set_slot(Slot::Body);
        match &mut function.body {
            FunctionBody::Expression(expr) => self.visit_expr(expr),
            FunctionBody::Block(block) => {
                for statement in &mut block.body {
                    self.visit_statement(statement);
                }
            }
        }
        self.chain.pop();
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        match expr {
            Expr::Identifier(id) => self.visit_identifier(id),
            Expr::Literal(_) | Expr::ThisExpression(_) => {}
            Expr::ArrayExpression(array) => {
                self.chain.push(NodeKind::Other);
                for element in &mut array.elements {
                    self.visit_child(Slot::Other, element);
                }
                self.chain.pop();
            }
            Expr::ObjectExpression(object) => {
                self.chain.push(NodeKind::Other);
                for property in &mut object.properties {
                    // Only computed keys are references
                    if property.computed {
                        self.visit_child(Slot::Other, &mut property.key);
                    }
                    self.visit_child(Slot::Other, &mut property.value);
                }
                self.chain.pop();
            }
            Expr::MemberExpression(member) => {
                self.chain.push(NodeKind::Member);
                self.visit_child(Slot::Object, &mut member.object);
                if member.computed {
                    self.visit_child(Slot::Property, &mut member.property);
                }
                self.chain.pop();
            }
            Expr::CallExpression(call) => {
                self.chain.push(NodeKind::Other);
                self.visit_child(Slot::Other, &mut call.callee);
                for argument in &mut call.arguments {
                    self.visit_child(Slot::Other, argument);
                }
                self.chain.pop();
            }
            Expr::UnaryExpression(unary) => {
                self.chain.push(NodeKind::Other);
                self.visit_child(Slot::Other, &mut unary.argument);
                self.chain.pop();
            }
            Expr::UpdateExpression(update) => {
                self.chain.push(NodeKind::Other);
                self.visit_child(Slot::Other, &mut update.argument);
                self.chain.pop();
            }
            Expr::BinaryExpression(binary) | Expr::LogicalExpression(binary) => {
                self.chain.push(NodeKind::Other);
                self.visit_child(Slot::Left, &mut binary.left);
                self.visit_child(Slot::Right, &mut binary.right);
                self.chain.pop();
            }
            Expr::ConditionalExpression(conditional) => {
                self.chain.push(NodeKind::Other);
                self.visit_child(Slot::Other, &mut conditional.test);
                self.visit_child(Slot::Other, &mut conditional.consequent);
                self.visit_child(Slot::Other, &mut conditional.alternate);
                self.chain.pop();
            }
            Expr::AssignmentExpression(assignment) => {
                self.chain.push(NodeKind::Assignment);
                self.visit_child(Slot::Left, &mut assignment.left);
                self.visit_child(Slot::Right, &mut assignment.right);
                self.chain.pop();
            }
            Expr::SequenceExpression(sequence) => {
                self.chain.push(NodeKind::Other);
                for expression in &mut sequence.expressions {
                    self.visit_child(Slot::Other, expression);
                }
                self.chain.pop();
            }
            Expr::ArrowFunctionExpression(function) | Expr::FunctionExpression(function) => {
                self.visit_function(function)
            }
        }
    }
}

/// Classified identifier reference, as consumed by the template compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    pub context: BindingContext,
    pub span: Span,
}

/// Every classified identifier of `program` in source order
pub fn collect_bindings(program: &Program) -> Vec<Binding> {
    let mut bindings: Vec<Binding> = program
        .identifiers()
        .into_iter()
        .filter_map(|id| {
            id.context.map(|context| Binding {
                name: id.name.clone(),
                context,
                span: id.span,
            })
        })
        .collect();
    bindings.sort_by_key(|binding| binding.span.start);
    bindings
}
