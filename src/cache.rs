//! Memoization of parsed expressions keyed by their exact source text.

use crate::ast::{ASTNode, Parser, ParserOptions};
use crate::error::{EvalResult, ParseError};
use crate::value::Arguments;
use log::{debug, trace};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// The parsed, immutable form of one source string.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: ASTNode,
}

impl Expression {
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Self::parse_with_options(source, ParserOptions::default())
    }

    pub fn parse_with_options(source: &str, options: ParserOptions) -> Result<Self, ParseError> {
        let root = Parser::parse_with_options(source, options)?;
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &ASTNode {
        &self.root
    }

    pub fn evaluate<A: Arguments + ?Sized>(&self, args: &A) -> EvalResult<f64> {
        self.root.evaluate(args)
    }

    /// Highest argument index the expression reads, `None` if it reads none.
    pub fn max_argument_index(&self) -> Option<usize> {
        self.root.max_argument_index()
    }
}

/// Unbounded, thread-safe map from source text to parsed [`Expression`].
///
/// Each distinct text is parsed at most once. Failed parses are not stored.
#[derive(Debug, Default)]
pub struct ExpressionCache {
    expressions: RwLock<HashMap<String, Arc<Expression>>>,
    options: ParserOptions,
    parses: AtomicUsize,
}

impl ExpressionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn get_or_parse(&self, text: &str) -> Result<Arc<Expression>, ParseError> {
        if let Some(expression) = self.get(text) {
            trace!("Cache hit: {}", text);
            return Ok(expression);
        }

        let mut expressions = self.expressions.write();
        // Another caller may have parsed it while we waited for the lock.
        if let Some(expression) = expressions.get(text) {
            return Ok(Arc::clone(expression));
        }

        // Parsing happens under the write lock, so readers of other texts wait
        // for one miss. This keeps each text to a single parse.
        debug!("Cache miss: {}", text);
        self.parses.fetch_add(1, Ordering::Relaxed);
        let expression = Arc::new(Expression::parse_with_options(text, self.options)?);
        expressions.insert(text.to_string(), Arc::clone(&expression));
        Ok(expression)
    }

    pub fn get(&self, text: &str) -> Option<Arc<Expression>> {
        self.expressions.read().get(text).cloned()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.expressions.read().contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.expressions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of times the parser has been invoked, including failed parses.
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::Relaxed)
    }
}
