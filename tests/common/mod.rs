//! Common test utilities for formula integration tests

#[allow(unused_imports)]
pub use formula::{run, run_with, Environment, Error, EvalError, Options, ParseError, Value};

/// Evaluate against a fresh environment and return the number result
#[allow(dead_code)]
pub fn eval_number(input: &str) -> f64 {
    match run(input, &mut Environment::new()) {
        Ok(Value::Number(n)) => n,
        other => panic!("{:?} evaluated to {:?}", input, other),
    }
}

/// Evaluate against a fresh environment
#[allow(dead_code)]
pub fn eval(input: &str) -> Result<Value, Error> {
    run(input, &mut Environment::new())
}

/// Postfix rendering of `input`, e.g. `54 49 SQRT 8 * +`
#[allow(dead_code)]
pub fn rpn(input: &str) -> String {
    let tokens = formula::to_rpn(input, &Options::default()).unwrap();
    formula::Rpn(&tokens).to_string()
}

/// Floating point comparison for computed results
#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
