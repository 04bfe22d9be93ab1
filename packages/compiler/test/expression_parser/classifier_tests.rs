/**
 * Classifier Tests
 *
 * Binding-context annotation and scope exclusion
 */

#[path = "utils/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::unparser::{unparse, unparse_expression};
    use super::utils::{identifiers, parse, parse_raw, parse_with_helpers};
    use endorphin_compiler::expression_parser::{
        classify_expression, collect_bindings, BindingContext, GlobalAllowList, HelperAllowList,
        ParseOptions, Parser, Statement,
    };

    fn check(code: &str, expected: &str) {
        assert_eq!(unparse(&parse(code)), expected, "Classified {:?}", code);
    }

    mod sigils {
        use super::*;

        #[test]
        fn should_classify_state() {
            check("#count + 1", "state:count + 1");
            assert_eq!(
                identifiers(&parse("#count + 1")),
                vec![("count".to_string(), Some("state"))]
            );
        }

        #[test]
        fn should_classify_variable() {
            check("@item.name", "variable:item.name");
        }

        #[test]
        fn should_classify_store() {
            check("$a.b", "store:a.b");
            assert_eq!(
                identifiers(&parse("$a.b")),
                vec![("a".to_string(), Some("store")), ("b".to_string(), None)]
            );
        }

        #[test]
        fn should_classify_every_occurrence() {
            check("#a ? @b : $c", "state:a ? variable:b : store:c");
            check("#count++", "state:count++");
        }
    }

    mod plain_names {
        use super::*;

        #[test]
        fn should_classify_property() {
            check("title", "property:title");
            check("a.b.c", "property:a.b.c");
            check("undefined", "property:undefined");
        }

        #[test]
        fn should_classify_helpers() {
            let program = parse_with_helpers("format(title)", &["format"]);
            assert_eq!(unparse(&program), "helper:format(property:title)");
        }

        #[test]
        fn should_not_use_helper_for_member_property() {
            let program = parse_with_helpers("a.format", &["format"]);
            assert_eq!(unparse(&program), "property:a.format");
        }

        #[test]
        fn should_prefer_sigil_over_helper() {
            let program = parse_with_helpers("#format", &["format"]);
            assert_eq!(unparse(&program), "state:format");
        }

        #[test]
        fn should_leave_this_alone() {
            check("this.a", "this.a");
        }
    }

    mod globals {
        use super::*;

        #[test]
        fn should_not_touch_default_globals() {
            let program = parse("Math.max(String(1), Boolean(Object))");
            assert!(identifiers(&program).iter().all(|(_, context)| context.is_none()));
            assert_eq!(unparse(&program), "Math.max(String(1), Boolean(Object))");
        }

        #[test]
        fn should_leave_globals_only_tree_unchanged() {
            let code = "Math.PI * Object";
            let raw = parse_raw(code);
            let classified = parse(code);
            assert_eq!(raw, classified);
        }

        #[test]
        fn should_accept_custom_globals() {
            let parser = Parser::new().with_globals(GlobalAllowList::new(["window"]));
            let program = parser.parse_js("window.x + Math", &ParseOptions::default()).unwrap();
            assert_eq!(unparse(&program), "window.x + property:Math");
        }
    }

    mod scope_exclusion {
        use super::*;

        #[test]
        fn should_skip_arrow_parameters() {
            check("(x) => x + #x", "(x) => x + state:x");
        }

        #[test]
        fn should_skip_parameters_of_outer_functions() {
            check("(a) => (b) => a + b + c", "(a) => (b) => (a + b) + property:c");
            check("a => items.map(b => a.x + b)", "(a) => property:items.map((b) => a.x + b)");
        }

        #[test]
        fn should_only_shield_inside_the_function() {
            check("[(x) => x, x]", "[(x) => x, property:x]");
        }

        #[test]
        fn should_skip_sigil_parameters() {
            check("(#a) => #a + #b", "(#a) => #a + state:b");
        }

        #[test]
        fn should_classify_default_values() {
            check("(a = #b) => a", "(a = state:b) => a");
        }

        #[test]
        fn should_skip_function_parameters() {
            check(
                "f(function (a) { return a + #b })",
                "property:f(function(a) { return a + state:b })",
            );
        }

        #[test]
        fn should_skip_function_declaration_names() {
            let program = parse("function g(a) { return a + b }");
            assert_eq!(unparse(&program), "function g(a) { return a + property:b }");
            assert!(matches!(program.body[0], Statement::FunctionDeclaration(_)));
        }

        #[test]
        fn should_skip_member_properties() {
            check("a.b", "property:a.b");
            check("a[b]", "property:a[b]");
            check("a?.b", "property:a?.b");
        }

        #[test]
        fn should_skip_assignment_targets() {
            check("x = @y", "x = variable:y");
            check("#count += 1", "#count += 1");
            assert_eq!(
                identifiers(&parse("x = @y")),
                vec![("x".to_string(), None), ("y".to_string(), Some("variable"))]
            );
        }

        #[test]
        fn should_classify_object_of_assigned_member() {
            check("a.b = c", "property:a.b = property:c");
        }

        #[test]
        fn should_classify_binary_left_operand() {
            check("a + b", "property:a + property:b");
        }
    }

    mod objects {
        use super::*;

        #[test]
        fn should_skip_plain_keys() {
            check("{a: #b, c}", "{a: state:b, c: property:c}");
        }

        #[test]
        fn should_classify_shorthand_value() {
            check("{#count}", "{#count: state:count}");
        }

        #[test]
        fn should_classify_computed_keys() {
            check("{[@key]: 1}", "{[variable:key]: 1}");
        }
    }

    mod standalone {
        use super::*;

        #[test]
        fn should_classify_expression_root() {
            let program = parse_raw("#a");
            let Statement::ExpressionStatement(statement) = &program.body[0] else {
                panic!("Expected expression statement");
            };
            let mut expr = statement.expression.clone();
            classify_expression(&mut expr, &GlobalAllowList::default(), &HelperAllowList::default());
            assert_eq!(unparse_expression(&expr), "state:a");
        }
    }

    mod bindings {
        use super::*;

        #[test]
        fn should_collect_bindings_in_source_order() {
            let program = parse("#a + b.c + fn(@d)");
            let bindings: Vec<(String, BindingContext)> = collect_bindings(&program)
                .into_iter()
                .map(|binding| (binding.name, binding.context))
                .collect();
            assert_eq!(
                bindings,
                vec![
                    ("a".to_string(), BindingContext::State),
                    ("b".to_string(), BindingContext::Property),
                    ("fn".to_string(), BindingContext::Property),
                    ("d".to_string(), BindingContext::Variable),
                ]
            );
        }

        #[test]
        fn should_report_binding_spans() {
            let program = parse("1 + #count");
            let bindings = collect_bindings(&program);
            assert_eq!(bindings.len(), 1);
            assert_eq!(bindings[0].span.start, 4);
            assert_eq!(bindings[0].span.end, 10);
        }
    }
}
