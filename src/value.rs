use crate::error::{EvalError, EvalResult};
use std::fmt;
use std::str::FromStr;

/// A positional argument supplied to an expression at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Integer(i64),
    Boolean(bool),
    Text(String),
    Null,
}

impl Value {
    /// Coerces the value to the engine's number type.
    ///
    /// `index` is only used to report which argument failed.
    pub fn to_number(&self, index: usize) -> EvalResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Integer(i) => Ok(*i as f64),
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Null => Ok(0.0),
            Value::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| EvalError::InvalidArgument {
                    index,
                    value: text.clone(),
                }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{}", s),
            Value::Null => write!(f, "null"),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value as $target)
                }
            }
        )*
    };
}

value_from! {
    f64 => Number as f64,
    f32 => Number as f64,
    i64 => Integer as i64,
    i32 => Integer as i64,
    u32 => Integer as i64,
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Number(value as f64),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Positional argument list an expression is evaluated against.
pub trait Arguments {
    fn count(&self) -> usize;

    /// Numeric value of the argument at `index`, which must be `< count()`.
    fn number_at(&self, index: usize) -> EvalResult<f64>;
}

impl Arguments for [Value] {
    fn count(&self) -> usize {
        self.len()
    }

    fn number_at(&self, index: usize) -> EvalResult<f64> {
        self[index].to_number(index)
    }
}

impl Arguments for [f64] {
    fn count(&self) -> usize {
        self.len()
    }

    fn number_at(&self, index: usize) -> EvalResult<f64> {
        Ok(self[index])
    }
}

impl<const N: usize> Arguments for [Value; N] {
    fn count(&self) -> usize {
        N
    }

    fn number_at(&self, index: usize) -> EvalResult<f64> {
        self.as_slice().number_at(index)
    }
}

impl<const N: usize> Arguments for [f64; N] {
    fn count(&self) -> usize {
        N
    }

    fn number_at(&self, index: usize) -> EvalResult<f64> {
        self.as_slice().number_at(index)
    }
}

impl<T> Arguments for Vec<T>
where
    [T]: Arguments,
{
    fn count(&self) -> usize {
        self.as_slice().count()
    }

    fn number_at(&self, index: usize) -> EvalResult<f64> {
        self.as_slice().number_at(index)
    }
}

/// Representation requested for an evaluation result.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Decimal,
    Double,
    Int32,
    Int64,
    Text,
}

impl OutputKind {
    /// Converts an engine number into this representation.
    pub fn convert(self, value: f64) -> EvalResult<Output> {
        match self {
            OutputKind::Decimal | OutputKind::Double => Ok(Output::Number(value)),
            OutputKind::Int32 => {
                let truncated = self.truncate(value, i32::MIN as f64, i32::MAX as f64 + 1.0)?;
                Ok(Output::Int32(truncated as i32))
            }
            OutputKind::Int64 => {
                // 2^63, the first integer above i64::MAX that f64 can represent.
                let truncated = self.truncate(value, i64::MIN as f64, 9_223_372_036_854_775_808.0)?;
                Ok(Output::Int64(truncated as i64))
            }
            OutputKind::Text => Ok(Output::Text(value.to_string())),
        }
    }

    /// Truncates toward zero, failing unless the result lies in `[min, end)`.
    fn truncate(self, value: f64, min: f64, end: f64) -> EvalResult<f64> {
        let truncated = value.trunc();
        if !truncated.is_finite() || truncated < min || truncated >= end {
            return Err(EvalError::OutputOutOfRange { value, kind: self });
        }
        Ok(truncated)
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputKind::Decimal => "decimal",
            OutputKind::Double => "double",
            OutputKind::Int32 => "int32",
            OutputKind::Int64 => "int64",
            OutputKind::Text => "string",
        };
        f.write_str(name)
    }
}

impl TryFrom<&str> for OutputKind {
    type Error = EvalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "decimal" => Ok(OutputKind::Decimal),
            "double" | "f64" => Ok(OutputKind::Double),
            "int" | "int32" | "i32" => Ok(OutputKind::Int32),
            "long" | "int64" | "i64" => Ok(OutputKind::Int64),
            "string" | "text" => Ok(OutputKind::Text),
            _ => Err(EvalError::UnsupportedOutputType {
                requested: value.to_string(),
            }),
        }
    }
}

impl FromStr for OutputKind {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputKind::try_from(s)
    }
}

/// An evaluation result converted to the requested [`OutputKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Number(f64),
    Int32(i32),
    Int64(i64),
    Text(String),
}

impl Output {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Output::Number(n) => Some(*n),
            Output::Int32(i) => Some(*i as f64),
            Output::Int64(i) => Some(*i as f64),
            Output::Text(_) => None,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Number(n) => write!(f, "{}", n),
            Output::Int32(i) => write!(f, "{}", i),
            Output::Int64(i) => write!(f, "{}", i),
            Output::Text(s) => f.write_str(s),
        }
    }
}
