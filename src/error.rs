use crate::ast::Operator;
use crate::value::OutputKind;
use thiserror::Error;

/// Reason a piece of source text could not be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("Unexpected end of text")]
    UnexpectedEnd,
    #[error("Unmatched '{{'")]
    UnmatchedBrace,
    #[error("Missing parameter index after '{{'")]
    MissingParameterIndex,
    #[error("'{0}' is not a valid parameter index")]
    InvalidParameterIndex(String),
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
    #[error("Unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("Expected '{0}'")]
    Expected(char),
    #[error("Expression nested too deeply")]
    NestingTooDeep,
}

/// A malformed expression. `position` is a byte offset into `source_text`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("error parsing expression '{source_text}': {kind} at position {position}")]
pub struct ParseError {
    pub source_text: String,
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(source_text: &str, position: usize, kind: ParseErrorKind) -> Self {
        Self {
            source_text: source_text.to_string(),
            position,
            kind,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("parameter index {index} is out of range, {supplied} parameter(s) supplied")]
    IndexOutOfRange { index: usize, supplied: usize },

    #[error("parameter {index} ({value}) cannot be converted to a number")]
    InvalidArgument { index: usize, value: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow in calculation: {operator}")]
    Overflow { operator: Operator },

    #[error("Unsupported target type {requested}")]
    UnsupportedOutputType { requested: String },

    #[error("result {value} does not fit in {kind}")]
    OutputOutOfRange { value: f64, kind: OutputKind },

    #[error("'{0}' must contain a math operator (+,-,*,/) plus a value")]
    InvalidShorthand(String),
}

pub type EvalResult<T> = Result<T, EvalError>;
