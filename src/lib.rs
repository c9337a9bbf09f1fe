//! A minimal arithmetic expression engine for data-binding converters.
//!
//! Expressions use `+ - * /`, unary minus, parentheses, numeric literals and
//! positional argument references (`x`/`a`, `y`/`b`, `z`/`c`, `t`/`d` for the
//! first four arguments, `{N}` for any index). A [`MathEngine`] caches each
//! parsed expression by its exact source text.
//!
//! ```
//! use mathconv::{MathEngine, OutputKind, Output};
//!
//! let engine = MathEngine::new();
//! assert_eq!(engine.evaluate("{0}+{1}*2", &[5.0, 3.0]).unwrap(), 11.0);
//! assert_eq!(
//!     engine.evaluate_as("(x+y)/2", &[3.0, 4.0], OutputKind::Text).unwrap(),
//!     Output::Text("3.5".to_string())
//! );
//! ```

pub mod ast;
pub mod cache;
pub mod engine;
pub mod error;
pub mod shorthand;
pub mod value;

pub use cache::{Expression, ExpressionCache};
pub use engine::{EngineOptions, MathEngine};
pub use error::{EvalError, EvalResult, ParseError, ParseErrorKind};
pub use value::{Arguments, Output, OutputKind, Value};

/// Parses and evaluates `expression` once, without caching.
pub fn evaluate_expression<A: Arguments + ?Sized>(expression: &str, args: &A) -> EvalResult<f64> {
    let ast = ast::Parser::parse_expression(expression)?;
    ast.evaluate(args)
}
