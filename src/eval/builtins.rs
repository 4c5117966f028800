//! Fixed-arity builtin functions
//!
//! Every function has exactly one arity. Arguments arrive in call order:
//! `IF(p, a, b)` receives `[p, a, b]` even though `b` was on top of the
//! stack.

use super::helpers::number;
use super::EvalError;
use crate::ast::Value;
use crate::env::Environment;

type BuiltinFn = fn(&mut Environment, Vec<Value>) -> Result<Value, EvalError>;

/// One entry of the function table
pub struct Builtin {
    pub name: &'static str,
    pub arity: usize,
    pub usage: &'static str,
    op: BuiltinFn,
}

impl Builtin {
    pub(crate) fn call(&self, env: &mut Environment, args: Vec<Value>) -> Result<Value, EvalError> {
        (self.op)(env, args)
    }
}

static BUILTINS: &[Builtin] = &[
    Builtin {
        name: "MAX",
        arity: 2,
        usage: "MAX(a, b)        the greater of a and b",
        op: builtin_max,
    },
    Builtin {
        name: "SQRT",
        arity: 1,
        usage: "SQRT(a)          square root (NaN below zero)",
        op: builtin_sqrt,
    },
    Builtin {
        name: "IF",
        arity: 3,
        usage: "IF(p, a, b)      a if p is true, else b",
        op: builtin_if,
    },
    Builtin {
        name: "SET",
        arity: 2,
        usage: "SET(#NAME, v)    bind NAME to v and return v",
        op: builtin_set,
    },
];

/// The whole function table, in a stable order
pub fn builtins() -> &'static [Builtin] {
    BUILTINS
}

pub fn lookup_builtin(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

/// Destructure an argument vector whose length the caller already checked
fn take<const N: usize>(name: &str, args: Vec<Value>) -> Result<[Value; N], EvalError> {
    args.try_into()
        .map_err(|_| EvalError::StackUnderflow(name.to_string()))
}

fn builtin_max(_env: &mut Environment, args: Vec<Value>) -> Result<Value, EvalError> {
    let [a, b] = take::<2>("MAX", args)?;
    let (a, b) = (number(&a)?, number(&b)?);
    // f64::max ignores a NaN side
    if a.is_nan() || b.is_nan() {
        return Ok(Value::Number(f64::NAN));
    }
    Ok(Value::Number(a.max(b)))
}

fn builtin_sqrt(_env: &mut Environment, args: Vec<Value>) -> Result<Value, EvalError> {
    let [a] = take::<1>("SQRT", args)?;
    Ok(Value::Number(number(&a)?.sqrt()))
}

fn builtin_if(_env: &mut Environment, args: Vec<Value>) -> Result<Value, EvalError> {
    let [predicate, if_true, if_false] = take::<3>("IF", args)?;
    Ok(if predicate.is_truthy() { if_true } else { if_false })
}

fn builtin_set(env: &mut Environment, args: Vec<Value>) -> Result<Value, EvalError> {
    let [key, value] = take::<2>("SET", args)?;
    let name = match key {
        Value::Key(name) => name,
        other => {
            return Err(EvalError::TypeMismatch {
                expected: "key".to_string(),
                got: other.type_name().to_string(),
            })
        }
    };
    if let Value::Key(_) = value {
        return Err(EvalError::TypeMismatch {
            expected: "number or boolean".to_string(),
            got: value.type_name().to_string(),
        });
    }
    env.set(name, value.clone());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: Vec<Value>) -> Result<Value, EvalError> {
        let mut env = Environment::new();
        lookup_builtin(name).unwrap().call(&mut env, args)
    }

    #[test]
    fn table_has_unique_names() {
        let names: Vec<&str> = builtins().iter().map(|b| b.name).collect();
        assert_eq!(names, ["MAX", "SQRT", "IF", "SET"]);
        assert!(lookup_builtin("MIN").is_none());
    }

    #[test]
    fn max_is_symmetric() {
        let a = call("MAX", vec![Value::Number(50.0), Value::Number(10.0)]).unwrap();
        let b = call("MAX", vec![Value::Number(10.0), Value::Number(50.0)]).unwrap();
        assert_eq!(a, Value::Number(50.0));
        assert_eq!(a, b);
    }

    #[test]
    fn max_keeps_nan() {
        for args in [
            vec![Value::Number(f64::NAN), Value::Number(3.0)],
            vec![Value::Number(3.0), Value::Number(f64::NAN)],
        ] {
            match call("MAX", args).unwrap() {
                Value::Number(n) => assert!(n.is_nan()),
                other => panic!("expected number, got {:?}", other),
            }
        }
    }

    #[test]
    fn sqrt_of_negative_is_nan() {
        match call("SQRT", vec![Value::Number(-1.0)]).unwrap() {
            Value::Number(n) => assert!(n.is_nan()),
            other => panic!("expected number, got {:?}", other),
        }
    }

    #[test]
    fn if_selects_branch() {
        let args = |p| vec![Value::Bool(p), Value::Number(6.0), Value::Number(9.0)];
        assert_eq!(call("IF", args(true)).unwrap(), Value::Number(6.0));
        assert_eq!(call("IF", args(false)).unwrap(), Value::Number(9.0));
    }

    #[test]
    fn set_writes_environment() {
        let mut env = Environment::new();
        let set = lookup_builtin("SET").unwrap();
        let result = set
            .call(&mut env, vec![Value::Key("FR".into()), Value::Number(95.0)])
            .unwrap();
        assert_eq!(result, Value::Number(95.0));
        assert_eq!(env.get("FR"), Some(&Value::Number(95.0)));
    }

    #[test]
    fn set_requires_key() {
        let err = call("SET", vec![Value::Number(1.0), Value::Number(2.0)]).unwrap_err();
        assert!(matches!(err, EvalError::TypeMismatch { ref expected, .. } if expected == "key"));

        let err = call("SET", vec![Value::Key("A".into()), Value::Key("B".into())]).unwrap_err();
        assert!(matches!(err, EvalError::TypeMismatch { ref got, .. } if got == "key"));
    }

    #[test]
    fn wrong_argument_count_underflows() {
        assert_eq!(
            call("MAX", vec![Value::Number(1.0)]),
            Err(EvalError::StackUnderflow("MAX".into()))
        );
    }
}
