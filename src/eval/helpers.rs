use super::{EvalError, Evaluator};
use crate::ast::Value;

impl Evaluator<'_> {
    /// Pop one operand, naming `context` if the stack is empty
    pub(crate) fn pop(&mut self, context: &str) -> Result<Value, EvalError> {
        self.stack
            .pop()
            .ok_or_else(|| EvalError::StackUnderflow(context.to_string()))
    }

    /// Pop the two operands of a binary operator as `(left, right)`.
    /// The right operand was pushed last, so it comes off first.
    pub(crate) fn pop_operands(&mut self, context: &str) -> Result<(Value, Value), EvalError> {
        let right = self.pop(context)?;
        let left = self.pop(context)?;
        Ok((left, right))
    }

    /// Pop `arity` arguments, returned in the order they were pushed
    pub(crate) fn pop_args(&mut self, context: &str, arity: usize) -> Result<Vec<Value>, EvalError> {
        let len = self.stack.len();
        if len < arity {
            return Err(EvalError::StackUnderflow(context.to_string()));
        }
        Ok(self.stack.split_off(len - arity))
    }
}

/// Numeric view of an operand, or a type error
pub(crate) fn number(value: &Value) -> Result<f64, EvalError> {
    value.as_number().ok_or_else(|| EvalError::TypeMismatch {
        expected: "number".to_string(),
        got: value.type_name().to_string(),
    })
}
