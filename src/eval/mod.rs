//! Evaluator for formula RPN sequences
//!
//! A single left-to-right pass over postfix tokens with one operand stack:
//! - numbers push themselves
//! - `#NAME` keys push the bare name, never looked up
//! - `$NAME` references push the current binding from the [`Environment`]
//! - operators pop two operands (right first) and push the result
//! - function names dispatch through the fixed-arity table in `builtins`
//!
//! The stack lives for one call. The environment outlives it: a `SET` that
//! ran before a later fault in the same expression stays applied.

mod builtins;
mod helpers;
mod ops;
mod tests;

pub use builtins::{builtins, lookup_builtin, Builtin};

use crate::ast::{Rpn, Value};
use crate::env::Environment;
use crate::lexer::{Ident, Token};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Stack underflow: {0}")]
    StackUnderflow(String),
    #[error("Undefined operator: {0}")]
    UndefinedOperator(String),
    #[error("Undefined function: {0}")]
    UndefinedFunction(String),
    #[error("${0} is undefined")]
    UndefinedVariable(String),
    #[error("Trailing operands: {0} values left on the stack")]
    TrailingOperands(usize),
    #[error("Type error: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("Empty expression")]
    EmptyExpression,
}

/// Runs RPN sequences against an environment
pub struct Evaluator<'env> {
    /// The operand stack, reset on every `eval`
    pub(crate) stack: Vec<Value>,
    pub(crate) env: &'env mut Environment,
    /// Trace mode - emit a trace event with the stack after each token
    pub(crate) trace_mode: bool,
}

impl<'env> Evaluator<'env> {
    pub fn new(env: &'env mut Environment) -> Self {
        Evaluator {
            stack: Vec::new(),
            env,
            trace_mode: false,
        }
    }

    /// Enable or disable trace mode
    pub fn set_trace_mode(&mut self, enabled: bool) {
        self.trace_mode = enabled;
    }

    /// Evaluate one RPN sequence to a single value
    pub fn eval(&mut self, rpn: &[Token]) -> Result<Value, EvalError> {
        self.stack.clear();
        tracing::debug!(rpn = %Rpn(rpn), "evaluating");

        for token in rpn {
            self.eval_token(token)?;
            if self.trace_mode {
                self.print_trace(token);
            }
        }

        self.finish()
    }

    fn eval_token(&mut self, token: &Token) -> Result<(), EvalError> {
        match token {
            Token::Number(n) => self.stack.push(Value::Number(*n)),
            Token::Ident(Ident::Key(name)) => self.stack.push(Value::Key(name.clone())),
            Token::Ident(Ident::Variable(name)) => {
                let value = self
                    .env
                    .get(name)
                    .cloned()
                    .ok_or_else(|| EvalError::UndefinedVariable(name.clone()))?;
                self.stack.push(value);
            }
            Token::Ident(Ident::Function(name)) => self.call(name)?,
            Token::Operator(op) => {
                let (left, right) = self.pop_operands(&op.symbol().to_string())?;
                self.stack.push(ops::apply(*op, left, right)?);
            }
            Token::Punct(p) => return Err(EvalError::UndefinedOperator(p.symbol().to_string())),
        }
        Ok(())
    }

    /// Dispatch a function name through the builtin table
    fn call(&mut self, name: &str) -> Result<(), EvalError> {
        let builtin =
            lookup_builtin(name).ok_or_else(|| EvalError::UndefinedFunction(name.to_string()))?;
        let args = self.pop_args(builtin.name, builtin.arity)?;
        let result = builtin.call(self.env, args)?;
        self.stack.push(result);
        Ok(())
    }

    /// Exactly one operand must remain
    fn finish(&mut self) -> Result<Value, EvalError> {
        match self.stack.len() {
            0 => Err(EvalError::EmptyExpression),
            1 => self.pop("result"),
            n => Err(EvalError::TrailingOperands(n)),
        }
    }

    /// Emit the token and the top of the stack
    pub(crate) fn print_trace(&self, token: &Token) {
        let top: Vec<String> = self
            .stack
            .iter()
            .rev()
            .take(5)
            .map(|v| v.to_string())
            .collect();
        tracing::trace!(
            token = %token,
            depth = self.stack.len(),
            top = %top.join(" "),
            "step"
        );
    }
}

/// Evaluate an RPN sequence against `env`
pub fn evaluate(rpn: &[Token], env: &mut Environment) -> Result<Value, EvalError> {
    Evaluator::new(env).eval(rpn)
}
