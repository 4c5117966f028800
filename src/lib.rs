//! formula - infix expressions evaluated through RPN
//!
//! # Overview
//!
//! A small formula language for embedders: numbers, arithmetic and
//! comparison operators, named variables and a handful of builtin
//! functions. An expression runs through three strictly pipelined stages:
//!
//! ```text
//! "54 + SQRT(49) * 8"
//!   lex      ->  54 + SQRT ( 49 ) * 8
//!   parse    ->  54 49 SQRT 8 * +          (postfix)
//!   evaluate ->  110                       (one stack pass)
//! ```
//!
//! # Variables
//!
//! ```text
//! $NAME              the current value of NAME
//! #NAME              the name itself, used as the first argument of SET
//! SET(#NAME, expr)   bind NAME and return the value
//! ```
//!
//! Bindings live in an [`Environment`] that the host passes to every call.
//! Passing the same instance across calls shares bindings between them;
//! [`Environment::reset`] restores the default constants `PI` and `E`.
//!
//! # Example
//!
//! ```rust
//! use formula::{run, Environment, Value};
//!
//! let mut env = Environment::new();
//! assert_eq!(run("SET(#FR, 45 + 50)", &mut env).unwrap(), Value::Number(95.0));
//! assert_eq!(run("$FR * 10", &mut env).unwrap(), Value::Number(950.0));
//! ```

pub mod ast;
pub mod display;
pub mod env;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod options;
pub mod parser;

// Re-export commonly used items
pub use ast::{Rpn, Value};
pub use env::Environment;
pub use error::Error;
pub use eval::{builtins, evaluate, Builtin, EvalError, Evaluator};
pub use lexer::{lex, lex_with, scan, Ident, LexError, Operator, Punct, Token};
pub use options::Options;
pub use parser::{parse, parse_with, ParseError};

use std::sync::Once;

/// Scan, parse and evaluate `input` against `env`
pub fn run(input: &str, env: &mut Environment) -> Result<Value, Error> {
    run_with(input, env, &Options::default())
}

/// [`run`] with explicit scanner/parser options
pub fn run_with(input: &str, env: &mut Environment, options: &Options) -> Result<Value, Error> {
    let tokens = lex_with(input, options)?;
    let rpn = parse_with(tokens, options)?;
    Ok(evaluate(&rpn, env)?)
}

/// Scan and parse `input`, returning the postfix form without evaluating it
pub fn to_rpn(input: &str, options: &Options) -> Result<Vec<Token>, Error> {
    let tokens = lex_with(input, options)?;
    Ok(parse_with(tokens, options)?)
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for hosts without their own.
///
/// Filtering follows `RUST_LOG`; `verbose` forces `formula=trace`, which
/// also shows every evaluation step when trace mode is on. Safe to call
/// more than once.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = if verbose {
            EnvFilter::new("formula=trace")
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
