use super::helpers::number;
use super::EvalError;
use crate::ast::Value;
use crate::lexer::Operator;

/// Apply a binary operator to `left op right`.
///
/// Arithmetic follows IEEE rules: `1 / 0` is infinity, not a fault.
/// Booleans count as 1/0 in arithmetic and ordering.
pub(crate) fn apply(op: Operator, left: Value, right: Value) -> Result<Value, EvalError> {
    // Equality is structural and accepts keys; everything else is numeric
    let (a, b) = match op {
        Operator::Equal => return Ok(Value::Bool(left == right)),
        _ => (number(&left)?, number(&right)?),
    };
    Ok(match op {
        Operator::Add => Value::Number(a + b),
        Operator::Sub => Value::Number(a - b),
        Operator::Mul => Value::Number(a * b),
        Operator::Div => Value::Number(a / b),
        Operator::Pow => Value::Number(a.powf(b)),
        Operator::Less => Value::Bool(a < b),
        Operator::Greater => Value::Bool(a > b),
        Operator::Equal => unreachable!("equality handled above"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(op: Operator, a: f64, b: f64) -> Value {
        apply(op, Value::Number(a), Value::Number(b)).unwrap()
    }

    #[test]
    fn arithmetic_keeps_operand_order() {
        assert_eq!(num(Operator::Sub, 10.0, 3.0), Value::Number(7.0));
        assert_eq!(num(Operator::Div, 10.0, 4.0), Value::Number(2.5));
        assert_eq!(num(Operator::Pow, 2.0, 10.0), Value::Number(1024.0));
    }

    #[test]
    fn greater_is_not_less() {
        assert_eq!(num(Operator::Greater, 5.0, 3.0), Value::Bool(true));
        assert_eq!(num(Operator::Greater, 3.0, 5.0), Value::Bool(false));
        assert_eq!(num(Operator::Less, 3.0, 5.0), Value::Bool(true));
        assert_eq!(num(Operator::Less, 5.0, 5.0), Value::Bool(false));
    }

    #[test]
    fn division_by_zero_is_infinite() {
        assert_eq!(num(Operator::Div, 1.0, 0.0), Value::Number(f64::INFINITY));
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(num(Operator::Equal, 2.0, 2.0), Value::Bool(true));
        let mixed = apply(Operator::Equal, Value::Number(1.0), Value::Bool(true)).unwrap();
        assert_eq!(mixed, Value::Bool(false));
        let keys = apply(Operator::Equal, Value::Key("A".into()), Value::Key("A".into())).unwrap();
        assert_eq!(keys, Value::Bool(true));
    }

    #[test]
    fn booleans_coerce_in_arithmetic() {
        let sum = apply(Operator::Add, Value::Bool(true), Value::Number(1.0)).unwrap();
        assert_eq!(sum, Value::Number(2.0));
    }

    #[test]
    fn keys_are_not_numbers() {
        let err = apply(Operator::Add, Value::Key("FR".into()), Value::Number(1.0)).unwrap_err();
        assert_eq!(
            err,
            EvalError::TypeMismatch {
                expected: "number".into(),
                got: "key".into()
            }
        );
    }
}
