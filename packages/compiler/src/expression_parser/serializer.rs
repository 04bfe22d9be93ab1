/**
 * Template Expression Serializer
 *
 * Serializes a program back to expression source. Identifiers classified
 * as state, variable or store get their sigil back, so a serialized tree
 * parses to the same program again.
 */
use super::ast::*;
use crate::chars;

/// Serialize a program to source text
pub fn serialize(program: &Program) -> String {
    let mut visitor = SerializeExpressionVisitor;
    visitor.visit_statements(&program.body)
}

/// Serialize a single expression to source text
pub fn serialize_expression(expr: &Expr) -> String {
    let mut visitor = SerializeExpressionVisitor;
    visitor.visit_expr(expr)
}

// Binding strength, loosest first
const SEQUENCE: u8 = 1;
const ASSIGNMENT: u8 = 2;
const CONDITIONAL: u8 = 3;
const PREFIX: u8 = 15;
const POSTFIX: u8 = 16;
const CALL: u8 = 17;
const PRIMARY: u8 = 18;

fn binary_precedence(operator: &str) -> u8 {
    match operator {
        "||" | "??" => 4,
        "&&" => 5,
        "|" => 6,
        "^" => 7,
        "&" => 8,
        "==" | "!=" | "===" | "!==" => 9,
        "<" | ">" | "<=" | ">=" | "in" | "instanceof" => 10,
        "<<" | ">>" | ">>>" => 11,
        "+" | "-" => 12,
        "*" | "/" | "%" => 13,
        "**" => 14,
        _ => PRIMARY,
    }
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::SequenceExpression(_) => SEQUENCE,
        Expr::AssignmentExpression(_) | Expr::ArrowFunctionExpression(_) => ASSIGNMENT,
        Expr::ConditionalExpression(_) => CONDITIONAL,
        Expr::BinaryExpression(b) | Expr::LogicalExpression(b) => binary_precedence(&b.operator),
        Expr::UnaryExpression(_) => PREFIX,
        Expr::UpdateExpression(u) if u.prefix => PREFIX,
        Expr::UpdateExpression(_) => POSTFIX,
        Expr::MemberExpression(_) | Expr::CallExpression(_) => CALL,
        Expr::Identifier(_)
        | Expr::Literal(_)
        | Expr::ThisExpression(_)
        | Expr::ArrayExpression(_)
        | Expr::ObjectExpression(_)
        | Expr::FunctionExpression(_) => PRIMARY,
    }
}

fn starts_with_function_keyword(text: &str) -> bool {
    text.strip_prefix("function")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|next| !chars::is_identifier_part(next))
}

struct SerializeExpressionVisitor;

impl SerializeExpressionVisitor {
    fn visit_statements(&mut self, statements: &[Statement]) -> String {
        statements
            .iter()
            .map(|s| self.visit_statement(s))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn visit_statement(&mut self, statement: &Statement) -> String {
        match statement {
            Statement::ExpressionStatement(s) => {
                let text = self.visit_expr(&s.expression);
                // A leading `function` keyword would start a declaration
                if starts_with_function_keyword(&text) {
                    format!("({})", text)
                } else {
                    text
                }
            }
            Statement::ReturnStatement(s) => match &s.argument {
                Some(argument) => format!("return {}", self.visit_expr(argument)),
                None => "return".to_string(),
            },
            Statement::FunctionDeclaration(f) => self.visit_function(f),
        }
    }

    /// Serialize `expr`, parenthesised when it binds looser than `min`
    fn visit_operand(&mut self, expr: &Expr, min: u8) -> String {
        let text = self.visit_expr(expr);
        if precedence(expr) < min {
            format!("({})", text)
        } else {
            text
        }
    }

    /// Callee or member object; function expressions are always grouped
    fn visit_callee(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::FunctionExpression(_) => format!("({})", self.visit_expr(expr)),
            _ => self.visit_operand(expr, CALL),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Identifier(id) => self.visit_identifier(id),
            Expr::Literal(literal) => literal.raw.clone(),
            Expr::ThisExpression(_) => "this".to_string(),
            Expr::ArrayExpression(array) => {
                format!("[{}]", self.visit_list(&array.elements))
            }
            Expr::ObjectExpression(object) => self.visit_object(object),
            Expr::MemberExpression(member) => self.visit_member(member),
            Expr::CallExpression(call) => {
                let callee = self.visit_callee(&call.callee);
                let args = self.visit_list(&call.arguments);
                if call.optional {
                    format!("{}?.({})", callee, args)
                } else {
                    format!("{}({})", callee, args)
                }
            }
            Expr::UnaryExpression(unary) => self.visit_unary(unary),
            Expr::UpdateExpression(update) => {
                if update.prefix {
                    format!("{}{}", update.operator, self.visit_operand(&update.argument, PREFIX))
                } else {
                    format!("{}{}", self.visit_operand(&update.argument, CALL), update.operator)
                }
            }
            Expr::BinaryExpression(binary) | Expr::LogicalExpression(binary) => {
                self.visit_binary(binary)
            }
            Expr::ConditionalExpression(conditional) => format!(
                "{} ? {} : {}",
                self.visit_operand(&conditional.test, CONDITIONAL + 1),
                self.visit_operand(&conditional.consequent, ASSIGNMENT),
                self.visit_operand(&conditional.alternate, ASSIGNMENT)
            ),
            Expr::AssignmentExpression(assignment) => format!(
                "{} {} {}",
                self.visit_operand(&assignment.left, POSTFIX),
                assignment.operator,
                self.visit_operand(&assignment.right, ASSIGNMENT)
            ),
            Expr::SequenceExpression(sequence) => self.visit_list(&sequence.expressions),
            Expr::ArrowFunctionExpression(function) => self.visit_arrow(function),
            Expr::FunctionExpression(function) => self.visit_function(function),
        }
    }

    fn visit_identifier(&mut self, id: &Identifier) -> String {
        match id.context.and_then(|context| context.sigil()) {
            Some(sigil) => format!("{}{}", sigil.as_char(), id.name),
            None => id.name.clone(),
        }
    }

    fn visit_list(&mut self, items: &[Expr]) -> String {
        items
            .iter()
            .map(|item| self.visit_operand(item, ASSIGNMENT))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn visit_object(&mut self, object: &ObjectExpression) -> String {
        if object.properties.is_empty() {
            return "{}".to_string();
        }
        let properties = object
            .properties
            .iter()
            .map(|property| {
                if property.shorthand {
                    return self.visit_expr(&property.value);
                }
                let key = if property.computed {
                    format!("[{}]", self.visit_operand(&property.key, ASSIGNMENT))
                } else {
                    self.visit_expr(&property.key)
                };
                format!("{}: {}", key, self.visit_operand(&property.value, ASSIGNMENT))
            })
            .collect::<Vec<_>>();
        format!("{{{}}}", properties.join(", "))
    }

    fn visit_member(&mut self, member: &MemberExpression) -> String {
        let object = self.visit_callee(&member.object);
        let property = self.visit_expr(&member.property);
        match (member.computed, member.optional) {
            (true, true) => format!("{}?.[{}]", object, property),
            (true, false) => format!("{}[{}]", object, property),
            (false, true) => format!("{}?.{}", object, property),
            (false, false) => format!("{}.{}", object, property),
        }
    }

    fn visit_unary(&mut self, unary: &UnaryExpression) -> String {
        let argument = self.visit_operand(&unary.argument, PREFIX);
        let needs_space = unary.operator.chars().all(char::is_alphabetic)
            || ((unary.operator == "-" || unary.operator == "+")
                && argument.starts_with(unary.operator.as_str()));
        if needs_space {
            format!("{} {}", unary.operator, argument)
        } else {
            format!("{}{}", unary.operator, argument)
        }
    }

    fn visit_binary(&mut self, binary: &BinaryExpression) -> String {
        let own = binary_precedence(&binary.operator);
        // `**` groups to the right, everything else to the left
        let (left_min, right_min) = if binary.operator == "**" {
            (own + 1, own)
        } else {
            (own, own + 1)
        };
        format!(
            "{} {} {}",
            self.visit_operand(&binary.left, left_min),
            binary.operator,
            self.visit_operand(&binary.right, right_min)
        )
    }

    fn visit_params(&mut self, params: &[Param]) -> String {
        params
            .iter()
            .map(|param| match param {
                Param::Identifier(id) => self.visit_identifier(id),
                Param::AssignmentPattern(pattern) => format!(
                    "{} = {}",
                    self.visit_identifier(&pattern.left),
                    self.visit_operand(&pattern.right, ASSIGNMENT)
                ),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn visit_body(&mut self, body: &FunctionBody) -> String {
        match body {
            FunctionBody::Block(block) if block.body.is_empty() => "{}".to_string(),
            FunctionBody::Block(block) => format!("{{ {} }}", self.visit_statements(&block.body)),
            // An object literal body would read as a block
            FunctionBody::Expression(expr) if matches!(**expr, Expr::ObjectExpression(_)) => {
                format!("({})", self.visit_expr(expr))
            }
            FunctionBody::Expression(expr) => self.visit_operand(expr, ASSIGNMENT),
        }
    }

    fn visit_arrow(&mut self, function: &Function) -> String {
        format!(
            "({}) => {}",
            self.visit_params(&function.params),
            self.visit_body(&function.body)
        )
    }

    fn visit_function(&mut self, function: &Function) -> String {
        let name = function
            .id
            .as_ref()
            .map(|id| format!(" {}", id.name))
            .unwrap_or_default();
        format!(
            "function{}({}) {}",
            name,
            self.visit_params(&function.params),
            self.visit_body(&function.body)
        )
    }
}
