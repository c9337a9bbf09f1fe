use crate::ast::{ParserOptions, DEFAULT_MAX_NESTING_DEPTH};
use crate::cache::{Expression, ExpressionCache};
use crate::error::{EvalResult, ParseError};
use crate::value::{Arguments, Output, OutputKind};
use log::debug;
use rayon::prelude::*;
use std::sync::Arc;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Deepest tree the parser will build. Parentheses, unary minus and
    /// chained binary operators each add a level.
    pub max_nesting_depth: usize,
}

impl EngineOptions {
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl From<EngineOptions> for ParserOptions {
    fn from(options: EngineOptions) -> Self {
        ParserOptions {
            max_nesting_depth: options.max_nesting_depth,
        }
    }
}

/// Evaluates arithmetic expressions over positional arguments, parsing each
/// distinct source text once.
///
/// `MathEngine` is `Send + Sync`; share it by reference across threads.
#[derive(Debug, Default)]
pub struct MathEngine {
    cache: ExpressionCache,
    options: EngineOptions,
}

impl MathEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            cache: ExpressionCache::with_options(options.into()),
            options,
        }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn cache(&self) -> &ExpressionCache {
        &self.cache
    }

    /// Returns the cached parse of `text`, parsing it on first use.
    pub fn parse(&self, text: &str) -> Result<Arc<Expression>, ParseError> {
        self.cache.get_or_parse(text)
    }

    /// Evaluates `text` against `args`.
    ///
    /// # Arguments
    ///
    /// * `text` - Expression source, e.g. `"{0}+{1}*2"` or `"(x+y)/2"`.
    /// * `args` - Positional arguments; `x`/`a` and `{0}` read the first one.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if parsing and evaluation succeed.
    /// * `Err(EvalError)` with the parse or evaluation failure.
    pub fn evaluate<A: Arguments + ?Sized>(&self, text: &str, args: &A) -> EvalResult<f64> {
        let expression = self.parse(text)?;
        expression.evaluate(args)
    }

    /// Evaluates `text` and converts the result to `kind`.
    pub fn evaluate_as<A: Arguments + ?Sized>(
        &self,
        text: &str,
        args: &A,
        kind: OutputKind,
    ) -> EvalResult<Output> {
        let value = self.evaluate(text, args)?;
        kind.convert(value)
    }

    /// Evaluates one expression against many argument rows in parallel.
    ///
    /// Parse failures are reported once for the whole batch; evaluation
    /// failures are reported per row.
    pub fn evaluate_batch<A: Arguments + Sync>(
        &self,
        text: &str,
        rows: &[A],
    ) -> Result<Vec<EvalResult<f64>>, ParseError> {
        let expression = self.parse(text)?;
        debug!("Evaluating '{}' against {} rows", text, rows.len());
        Ok(rows.par_iter().map(|row| expression.evaluate(row)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EvalError, ParseErrorKind};
    use crate::value::Value;

    const NO_ARGS: [f64; 0] = [];

    #[test]
    fn test_evaluates_expression() {
        let engine = MathEngine::new();
        let result = engine
            .evaluate_as("{0}+{1}*2", &[Value::from(5), Value::from(3)], OutputKind::Double)
            .unwrap();
        assert_eq!(result, Output::Number(11.0));
    }

    #[test]
    fn test_output_kinds() {
        let engine = MathEngine::new();
        assert_eq!(
            engine.evaluate_as("x/2", &[7.0], OutputKind::Decimal).unwrap(),
            Output::Number(3.5)
        );
        assert_eq!(
            engine.evaluate_as("x/2", &[7.0], OutputKind::Int32).unwrap(),
            Output::Int32(3)
        );
        assert_eq!(
            engine.evaluate_as("-x/2", &[7.0], OutputKind::Int64).unwrap(),
            Output::Int64(-3)
        );
        assert_eq!(
            engine.evaluate_as("x/2", &[7.0], OutputKind::Text).unwrap(),
            Output::Text("3.5".to_string())
        );
    }

    #[test]
    fn test_parse_errors_propagate() {
        let engine = MathEngine::new();
        match engine.evaluate("2+", &NO_ARGS) {
            Err(EvalError::Parse(err)) => assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_does_not_poison_cache() {
        let engine = MathEngine::new();

        assert!(matches!(
            engine.evaluate("x+y", &[1.0]),
            Err(EvalError::IndexOutOfRange { index: 1, supplied: 1 })
        ));
        assert_eq!(engine.evaluate("x+y", &[1.0, 2.0]).unwrap(), 3.0);
        assert_eq!(engine.cache().parse_count(), 1);
    }

    #[test]
    fn test_engine_options() {
        let engine = MathEngine::with_options(EngineOptions::default().with_max_nesting_depth(2));
        assert_eq!(engine.options().max_nesting_depth, 2);
        assert!(engine.evaluate("((1))", &NO_ARGS).is_ok());
        assert!(engine.evaluate("(((1)))", &NO_ARGS).is_err());
        assert!(engine.evaluate("1+1*1", &NO_ARGS).is_ok());
        assert!(engine.evaluate("1+1+1+1", &NO_ARGS).is_err());
    }

    #[test]
    fn test_batch_evaluation() {
        let engine = MathEngine::new();
        let rows: Vec<Vec<f64>> = (0..100).map(|i| vec![i as f64, 2.0]).collect();

        let results = engine.evaluate_batch("x*y+1", &rows).unwrap();

        assert_eq!(results.len(), 100);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(*result, Ok(i as f64 * 2.0 + 1.0));
        }
        assert_eq!(engine.cache().parse_count(), 1);
    }

    #[test]
    fn test_batch_reports_row_errors() {
        let engine = MathEngine::new();
        let rows = vec![vec![4.0, 2.0], vec![4.0, 0.0], vec![4.0]];

        let results = engine.evaluate_batch("x/y", &rows).unwrap();

        assert_eq!(results[0], Ok(2.0));
        assert_eq!(results[1], Err(EvalError::DivisionByZero));
        assert!(matches!(results[2], Err(EvalError::IndexOutOfRange { .. })));
        assert!(engine.evaluate_batch("x/", &rows).is_err());
    }
}
