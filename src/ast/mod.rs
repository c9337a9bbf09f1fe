use crate::error::{EvalError, EvalResult};
use std::fmt;

mod cursor;
mod evaluator;
mod parser;

pub use cursor::Cursor;
pub use parser::{ExpressionParser as Parser, ParserOptions, DEFAULT_MAX_NESTING_DEPTH};

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Constant(f64),
    /// Reference to the positional argument at this index.
    Variable(usize),
    Negate(Box<ASTNode>),
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
}

impl ASTNode {
    pub fn binary(left: ASTNode, operator: Operator, right: ASTNode) -> Self {
        ASTNode::BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn negate(operand: ASTNode) -> Self {
        ASTNode::Negate(Box::new(operand))
    }

    /// Highest argument index referenced anywhere in the tree.
    pub fn max_argument_index(&self) -> Option<usize> {
        match self {
            ASTNode::Constant(_) => None,
            ASTNode::Variable(index) => Some(*index),
            ASTNode::Negate(operand) => operand.max_argument_index(),
            ASTNode::BinaryOperation { left, right, .. } => {
                match (left.max_argument_index(), right.max_argument_index()) {
                    (Some(l), Some(r)) => Some(l.max(r)),
                    (l, r) => l.or(r),
                }
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Applies the operator. Division by zero and results that leave the
    /// finite range are errors rather than IEEE infinities.
    pub fn apply(&self, left: f64, right: f64) -> EvalResult<f64> {
        let result = match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => {
                if right == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                left / right
            }
        };

        if !result.is_finite() && left.is_finite() && right.is_finite() {
            return Err(EvalError::Overflow { operator: *self });
        }
        Ok(result)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<&str> for Operator {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Operator::from_char(c).ok_or_else(|| format!("Unknown operator: {}", value))
            }
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}
