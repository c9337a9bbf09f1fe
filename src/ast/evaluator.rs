use crate::ast::ASTNode;
use crate::error::{EvalError, EvalResult};
use crate::value::Arguments;

impl ASTNode {
    /// Evaluates the tree against positional arguments.
    ///
    /// The tree is never mutated, so one parsed expression may be evaluated
    /// from many threads at once.
    pub fn evaluate<A: Arguments + ?Sized>(&self, args: &A) -> EvalResult<f64> {
        match self {
            ASTNode::Constant(value) => Ok(*value),

            ASTNode::Variable(index) => {
                let supplied = args.count();
                if *index >= supplied {
                    return Err(EvalError::IndexOutOfRange {
                        index: *index,
                        supplied,
                    });
                }
                args.number_at(*index)
            }

            ASTNode::Negate(operand) => Ok(-operand.evaluate(args)?),

            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = left.evaluate(args)?;
                let right_value = right.evaluate(args)?;
                operator.apply(left_value, right_value)
            }
        }
    }
}
