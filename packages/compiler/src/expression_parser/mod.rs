/**
 * Expression Parser Module
 *
 * Sigil-aware template expression parsing: grammar, lexer, position
 * translation, parser, scope analysis and identifier classification.
 */
pub mod ast;
pub mod classifier;
pub mod extractor;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod scope;
pub mod serializer;

pub use ast::*;
pub use classifier::{
    classify, classify_expression, collect_bindings, Binding, GlobalAllowList, HelperAllowList,
};
pub use extractor::{extract_expression, ExpressionScanner, ExtractedExpression};
pub use grammar::{BindingContext, Grammar, GrammarExtension, Sigil, Sigils};
pub use lexer::Lexer;
pub use parser::{parse_js, ParseOptions, Parser};
pub use position::PositionTranslator;
pub use serializer::{serialize, serialize_expression};
