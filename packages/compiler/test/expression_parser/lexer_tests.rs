/**
 * Lexer Tests
 *
 * Tokenization of template expressions, including sigil identifiers
 */

#[cfg(test)]
mod tests {
    use endorphin_compiler::expression_parser::grammar::{Grammar, GrammarExtension, Sigils};
    use endorphin_compiler::expression_parser::lexer::{Lexer, Token, TokenType};
    use endorphin_compiler::Position;

    fn lex(text: &str) -> Vec<Token> {
        Lexer::new(Grammar::template()).tokenize(text)
    }

    fn expect_token(token: &Token, start: usize, end: usize) {
        assert_eq!(token.start(), start, "Token start mismatch");
        assert_eq!(token.end(), end, "Token end mismatch");
    }

    fn expect_identifier_token(token: &Token, start: usize, end: usize, name: &str) {
        expect_token(token, start, end);
        assert!(token.is_identifier(), "Expected identifier token, got {:?}", token);
        assert_eq!(token.str_value, name);
    }

    fn expect_operator_token(token: &Token, start: usize, end: usize, operator: &str) {
        expect_token(token, start, end);
        assert!(token.is_operator(operator), "Expected operator token '{}'", operator);
    }

    fn expect_error_token(token: &Token, start: usize, message: &str) {
        assert!(token.is_error(), "Expected error token, got {:?}", token);
        assert_eq!(token.start(), start);
        assert_eq!(token.str_value, message);
    }

    mod identifiers {
        use super::*;

        #[test]
        fn should_tokenize_a_simple_identifier() {
            let tokens = lex("j");
            assert_eq!(tokens.len(), 1);
            expect_identifier_token(&tokens[0], 0, 1, "j");
        }

        #[test]
        fn should_tokenize_state_identifier() {
            let tokens = lex("#count");
            assert_eq!(tokens.len(), 1);
            expect_identifier_token(&tokens[0], 0, 6, "#count");
        }

        #[test]
        fn should_tokenize_variable_identifier() {
            let tokens = lex("@item.name");
            assert_eq!(tokens.len(), 3);
            expect_identifier_token(&tokens[0], 0, 5, "@item");
            assert!(tokens[1].is_character('.'));
            expect_identifier_token(&tokens[2], 6, 10, "name");
        }

        #[test]
        fn should_tokenize_store_identifier() {
            let tokens = lex("$user");
            expect_identifier_token(&tokens[0], 0, 5, "$user");
        }

        #[test]
        fn should_keep_dollar_inside_identifiers() {
            let tokens = lex("a$b");
            assert_eq!(tokens.len(), 1);
            expect_identifier_token(&tokens[0], 0, 3, "a$b");
        }

        #[test]
        fn should_tokenize_sigils_in_expression() {
            let tokens = lex("#a+@b-$c");
            assert_eq!(tokens.len(), 5);
            expect_identifier_token(&tokens[0], 0, 2, "#a");
            expect_operator_token(&tokens[1], 2, 3, "+");
            expect_identifier_token(&tokens[2], 3, 5, "@b");
            expect_operator_token(&tokens[3], 5, 6, "-");
            expect_identifier_token(&tokens[4], 6, 8, "$c");
        }

        #[test]
        fn should_tokenize_unicode_identifier() {
            let tokens = lex("#счёт");
            expect_identifier_token(&tokens[0], 0, 5, "#счёт");
        }
    }

    mod sigil_errors {
        use super::*;

        #[test]
        fn should_reject_bare_hash() {
            let tokens = lex("#");
            assert_eq!(tokens.len(), 1);
            expect_error_token(&tokens[0], 0, "Expected identifier after '#'");
        }

        #[test]
        fn should_reject_sigil_before_digit() {
            let tokens = lex("a + @1");
            expect_error_token(&tokens[2], 4, "Expected identifier after '@'");
        }

        #[test]
        fn should_reject_bare_dollar() {
            let tokens = lex("$");
            expect_error_token(&tokens[0], 0, "Expected identifier after '$'");
        }

        #[test]
        fn should_stop_after_first_error() {
            let tokens = lex("# + b");
            assert_eq!(tokens.len(), 1);
        }
    }

    mod grammar {
        use super::*;

        #[test]
        fn should_only_accept_enabled_sigils() {
            let grammar = Grammar::base().extend(GrammarExtension::SigilIdentifiers(Sigils::STATE));
            let lexer = Lexer::new(grammar);

            assert!(lexer.tokenize("#a")[0].is_identifier());
            assert!(lexer.tokenize("@a")[0].is_error());
        }

        #[test]
        fn should_default_to_template_grammar() {
            let tokens = Lexer::default().tokenize("@a");
            assert!(tokens[0].is_identifier());
        }
    }

    mod literals {
        use super::*;

        #[test]
        fn should_tokenize_numbers() {
            let tokens = lex("1 2.5 .5 1e3");
            let values: Vec<f64> = tokens.iter().map(|t| t.num_value).collect();
            assert_eq!(values, vec![1.0, 2.5, 0.5, 1000.0]);
            assert!(tokens.iter().all(Token::is_number));
        }

        #[test]
        fn should_tokenize_strings_with_escapes() {
            let tokens = lex(r#""a\"b" 'c\nd' '\u0041'"#);
            assert_eq!(tokens[0].str_value, "a\"b");
            assert_eq!(tokens[1].str_value, "c\nd");
            assert_eq!(tokens[2].str_value, "A");
        }

        #[test]
        fn should_tokenize_radix_numbers() {
            let tokens = lex("0xff 0o17 0b101 0XA");
            let values: Vec<f64> = tokens.iter().map(|t| t.num_value).collect();
            assert_eq!(values, vec![255.0, 15.0, 5.0, 10.0]);
            assert!(tokens.iter().all(Token::is_number));
            assert_eq!(tokens[0].str_value, "0xff");
            expect_token(&tokens[0], 0, 4);
        }

        #[test]
        fn should_reject_malformed_radix_numbers() {
            expect_error_token(&lex("0x")[0], 0, "Invalid number");
            expect_error_token(&lex("0b12")[0], 0, "Invalid number");
            expect_error_token(&lex("1a")[0], 0, "Identifier directly after number");
        }

        #[test]
        fn should_decode_hex_escapes() {
            let tokens = lex(r"'\x41\x62'");
            assert_eq!(tokens[0].str_value, "Ab");
            assert!(lex(r"'\xZ1'")[0].is_error());
        }

        #[test]
        fn should_report_unterminated_string() {
            let tokens = lex("'abc");
            expect_error_token(&tokens[0], 0, "Unterminated string constant");
        }

        #[test]
        fn should_not_treat_sigil_in_string_as_identifier() {
            let tokens = lex("'#a'");
            assert_eq!(tokens[0].token_type, TokenType::String);
            assert_eq!(tokens[0].str_value, "#a");
        }
    }

    mod operators {
        use super::*;

        #[test]
        fn should_prefer_longest_operator() {
            let tokens = lex("a === b ?? c => d");
            expect_operator_token(&tokens[1], 2, 5, "===");
            expect_operator_token(&tokens[3], 8, 10, "??");
            expect_operator_token(&tokens[5], 13, 15, "=>");
        }

        #[test]
        fn should_tokenize_optional_chain() {
            let tokens = lex("a?.b");
            expect_operator_token(&tokens[1], 1, 3, "?.");
        }

        #[test]
        fn should_split_question_before_digit() {
            let tokens = lex("a?.5:1");
            expect_operator_token(&tokens[1], 1, 2, "?");
            assert!(tokens[2].is_number());
        }

        #[test]
        fn should_report_unexpected_character() {
            let tokens = lex("a ¬ b");
            expect_error_token(&tokens[1], 2, "Unexpected character '¬'");
        }
    }

    mod locations {
        use super::*;

        #[test]
        fn should_track_lines_and_columns() {
            let tokens = lex("#a\n  + @b");
            assert_eq!(tokens[0].span.loc.start, Position::new(1, 0));
            assert_eq!(tokens[0].span.loc.end, Position::new(1, 2));
            assert_eq!(tokens[2].span.loc.start, Position::new(2, 4));
            assert_eq!(tokens[2].span.loc.end, Position::new(2, 6));
        }

        #[test]
        fn should_report_unterminated_comment() {
            let tokens = lex("a + b /* never closed");
            assert_eq!(tokens.len(), 4);
            expect_error_token(&tokens[3], 6, "Unterminated comment");
            assert_eq!(tokens[3].end(), 21);
        }

        #[test]
        fn should_skip_comments() {
            let tokens = lex("a // note\n/* block */ b");
            assert_eq!(tokens.len(), 2);
            expect_identifier_token(&tokens[1], 22, 23, "b");
            assert!(tokens[1].newline_before);
        }
    }
}
