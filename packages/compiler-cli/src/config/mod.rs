pub mod expression;

pub use expression::ExpressionConfig;
