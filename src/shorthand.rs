//! One-operation shorthand applied to a single bound value, e.g. `"+5"`,
//! `"* -2"` or `"/ 0.5"`.

use crate::ast::{Cursor, Operator};
use crate::error::{EvalError, EvalResult};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Shorthand {
    pub operator: Operator,
    pub operand: f64,
}

impl Shorthand {
    /// Finds the first `<operator> <signed number>` pair in `parameter`.
    pub fn parse(parameter: &str) -> EvalResult<Self> {
        let mut cursor = Cursor::new(parameter);

        while let Some(c) = cursor.peek() {
            cursor.advance();
            let Some(operator) = Operator::from_char(c) else {
                continue;
            };

            let resume = cursor.position();
            if let Some(operand) = Self::operand(&mut cursor) {
                return operand
                    .parse::<f64>()
                    .map(|operand| Shorthand { operator, operand })
                    .map_err(|_| EvalError::InvalidShorthand(parameter.to_string()));
            }
            cursor.set_position(resume);
        }

        Err(EvalError::InvalidShorthand(parameter.to_string()))
    }

    /// Matches `-?[0-9.]+` after optional whitespace.
    fn operand<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
        cursor.skip_whitespace();
        let start = cursor.position();
        cursor.eat('-');
        let digits_start = cursor.position();
        while matches!(cursor.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            cursor.advance();
        }
        if cursor.position() == digits_start {
            return None;
        }
        Some(&cursor.text()[start..cursor.position()])
    }

    pub fn apply(&self, value: f64) -> EvalResult<f64> {
        self.operator.apply(value, self.operand)
    }
}

/// Applies the shorthand operation in `parameter` to `value`.
pub fn apply(value: f64, parameter: &str) -> EvalResult<f64> {
    Shorthand::parse(parameter)?.apply(value)
}
