/**
 * Parser Tests
 *
 * Grammar coverage of the template expression parser
 */

#[path = "utils/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::unparser::{unparse, unparse_expression};
    use super::utils::{first_expression, parse_error, parse_raw};
    use endorphin_compiler::expression_parser::ast::*;

    fn check(code: &str, expected: &str) {
        let program = parse_raw(code);
        assert_eq!(unparse(&program), expected, "Unparsed {:?}", code);
    }

    fn expect_error(code: &str, message: &str, pos: usize) {
        let err = parse_error(code);
        assert_eq!(err.message, message, "Error for {:?}", code);
        assert_eq!(err.pos, pos, "Error position for {:?}", code);
    }

    mod literals {
        use super::*;

        #[test]
        fn should_parse_primitives() {
            check("1", "1");
            check("'a'", "'a'");
            check("\"b\"", "\"b\"");
            check("true", "true");
            check("null", "null");
            check("this", "this");
        }

        #[test]
        fn should_treat_undefined_as_identifier() {
            let program = parse_raw("undefined");
            assert!(matches!(first_expression(&program), Expr::Identifier(_)));
        }

        #[test]
        fn should_parse_literal_values() {
            let program = parse_raw("2.5");
            match first_expression(&program) {
                Expr::Literal(literal) => assert_eq!(literal.value, LiteralValue::Number(2.5)),
                other => panic!("Expected literal, got {:?}", other),
            }
        }

        #[test]
        fn should_parse_radix_literals() {
            let program = parse_raw("0xff + 0b10");
            assert_eq!(unparse(&program), "0xff + 0b10");
            match first_expression(&program) {
                Expr::BinaryExpression(binary) => match &*binary.left {
                    Expr::Literal(literal) => assert_eq!(literal.value, LiteralValue::Number(255.0)),
                    other => panic!("Expected literal, got {:?}", other),
                },
                other => panic!("Expected binary expression, got {:?}", other),
            }
        }

        #[test]
        fn should_parse_arrays() {
            check("[1, a, [b]]", "[1, a, [b]]");
            check("[]", "[]");
            check("[1, 2,]", "[1, 2]");
        }

        #[test]
        fn should_parse_objects() {
            check("{a: 1, 'b': c, 2: d, [e]: f}", "{a: 1, 'b': c, 2: d, [e]: f}");
            check("{}", "{}");
            check("{if: 1}", "{if: 1}");
        }

        #[test]
        fn should_parse_shorthand_properties() {
            let program = parse_raw("{#count, b}");
            match first_expression(&program) {
                Expr::ObjectExpression(object) => {
                    assert!(object.properties.iter().all(|p| p.shorthand));
                    assert_eq!(object.properties[0].key.as_identifier().unwrap().name, "#count");
                }
                other => panic!("Expected object, got {:?}", other),
            }
        }
    }

    mod operators {
        use super::*;

        #[test]
        fn should_respect_precedence() {
            check("a + b * c", "a + (b * c)");
            check("a * b + c", "(a * b) + c");
            check("a || b && c", "a || (b && c)");
            check("a == b < c", "a == (b < c)");
            check("a | b ^ c & d", "a | (b ^ (c & d))");
            check("a << b + c", "a << (b + c)");
        }

        #[test]
        fn should_be_left_associative() {
            check("a - b - c", "(a - b) - c");
        }

        #[test]
        fn should_parse_exponent_right_associative() {
            check("a ** b ** c", "a ** (b ** c)");
        }

        #[test]
        fn should_parse_keyword_operators() {
            check("a in b", "a in b");
            check("a instanceof B", "a instanceof B");
            check("typeof a", "typeof a");
            check("void 0", "void 0");
        }

        #[test]
        fn should_parse_unary() {
            check("!a", "!a");
            check("-a + +b", "(-a) + (+b)");
            check("~a", "~a");
        }

        #[test]
        fn should_parse_update() {
            check("a++", "a++");
            check("--a.b", "--a.b");
        }

        #[test]
        fn should_parse_logical_nodes() {
            let program = parse_raw("a ?? b");
            assert!(matches!(first_expression(&program), Expr::LogicalExpression(_)));
        }

        #[test]
        fn should_parse_conditional() {
            check("a ? b : c ? d : e", "a ? b : (c ? d : e)");
            check("a ? b = 1 : c", "a ? (b = 1) : c");
        }

        #[test]
        fn should_parse_sequence() {
            check("a, b, c", "a, b, c");
        }
    }

    mod assignment {
        use super::*;

        #[test]
        fn should_parse_assignment() {
            check("a = b", "a = b");
            check("a.b = c", "a.b = c");
            check("a[b] += 1", "a[b] += 1");
            check("a = b = c", "a = (b = c)");
            check("a ??= b", "a ??= b");
        }

        #[test]
        fn should_reject_invalid_targets() {
            expect_error("1 = 2", "Assigning to rvalue", 0);
            expect_error("a + b = c", "Assigning to rvalue", 0);
            expect_error("f()++", "Assigning to rvalue", 0);
            expect_error("x + ++1", "Assigning to rvalue", 6);
        }
    }

    mod members_and_calls {
        use super::*;

        #[test]
        fn should_parse_member_access() {
            check("a.b.c", "a.b.c");
            check("a[0]", "a[0]");
            check("a?.b", "a?.b");
            check("a?.[b]", "a?.[b]");
            check("a.if", "a.if");
        }

        #[test]
        fn should_parse_calls() {
            check("f()", "f()");
            check("a.f(1, b)", "a.f(1, b)");
            check("f?.(x)", "f?.(x)");
            check("f(a)(b)", "f(a)(b)");
        }

        #[test]
        fn should_mark_computed_members() {
            let program = parse_raw("a[b]");
            match first_expression(&program) {
                Expr::MemberExpression(member) => {
                    assert!(member.computed);
                    assert!(!member.optional);
                }
                other => panic!("Expected member, got {:?}", other),
            }
        }
    }

    mod functions {
        use super::*;

        #[test]
        fn should_parse_arrow_functions() {
            check("x => x", "(x) => x");
            check("(a, b) => a + b", "(a, b) => a + b");
            check("() => 1", "() => 1");
            check("(a = 1) => a", "(a = 1) => a");
            check("(a) => { return a }", "(a) => { return a }");
        }

        #[test]
        fn should_parse_nested_arrows() {
            check("a => b => a + b", "(a) => (b) => a + b");
        }

        #[test]
        fn should_parse_arrow_as_argument() {
            check("items.map(item => item.name)", "items.map((item) => item.name)");
        }

        #[test]
        fn should_parse_function_expression() {
            check("f(function (a) { return a })", "f(function(a) { return a })");
        }

        #[test]
        fn should_parse_function_declaration() {
            let program = parse_raw("function add(a, b) { return a + b }");
            match &program.body[0] {
                Statement::FunctionDeclaration(function) => {
                    assert_eq!(function.id.as_ref().unwrap().name, "add");
                    assert_eq!(function.params.len(), 2);
                }
                other => panic!("Expected function declaration, got {:?}", other),
            }
        }

        #[test]
        fn should_require_declaration_name() {
            expect_error("function () {}", "Unexpected token", 9);
        }
    }

    mod statements {
        use super::*;

        #[test]
        fn should_split_on_semicolons() {
            check("a; b", "a; b");
            check("a;;", "a");
        }

        #[test]
        fn should_split_on_newlines() {
            check("a\nb", "a; b");
        }

        #[test]
        fn should_reject_missing_separator() {
            expect_error("a b", "Unexpected token", 2);
        }

        #[test]
        fn should_reject_return_outside_function() {
            expect_error("return a", "'return' outside of function", 0);
        }

        #[test]
        fn should_parse_empty_program() {
            let program = parse_raw("");
            assert!(program.body.is_empty());
            assert_eq!(program.span.start, 0);
            assert_eq!(program.span.end, 0);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_unbalanced_parens() {
            expect_error("(a + b", "Unexpected token", 6);
            expect_error("a + b)", "Unexpected token", 5);
        }

        #[test]
        fn should_report_unexpected_end() {
            expect_error("a +", "Unexpected token", 3);
        }

        #[test]
        fn should_report_lexer_errors() {
            expect_error("a + #", "Expected identifier after '#'", 4);
            expect_error("{#}", "Expected identifier after '#'", 1);
            expect_error("$", "Expected identifier after '$'", 0);
        }

        #[test]
        fn should_report_unterminated_comment() {
            expect_error("a + b /* never closed", "Unterminated comment", 6);
            expect_error("/*", "Unterminated comment", 0);
            check("a /* closed */ + b", "a + b");
        }

        #[test]
        fn should_format_error_location() {
            let err = parse_error("a +\n  )");
            assert_eq!(err.to_string(), "Unexpected token (2:2)");
        }
    }

    mod spans {
        use super::*;

        #[test]
        fn should_span_whole_expression() {
            let program = parse_raw("foo(1) + bar");
            let expr = first_expression(&program);
            assert_eq!(expr.span().start, 0);
            assert_eq!(expr.span().end, 12);
        }

        #[test]
        fn should_not_include_trailing_whitespace() {
            let program = parse_raw("a.b   ");
            assert_eq!(first_expression(&program).span().end, 3);
            assert_eq!(program.span.end, 6);
        }

        #[test]
        fn should_render_expression_without_program() {
            let program = parse_raw("a.b");
            assert_eq!(unparse_expression(first_expression(&program)), "a.b");
        }
    }
}
