//! Errors from the whole pipeline

use crate::eval::EvalError;
use crate::lexer::LexError;
use crate::parser::ParseError;
use thiserror::Error;

/// Any fault raised while running an expression. The stage that raised it
/// aborted the rest of the pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Scan error: {0}")]
    Scan(#[from] LexError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
}
