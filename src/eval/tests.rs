#[cfg(test)]
mod tests {
    use crate::ast::Value;
    use crate::env::Environment;
    use crate::eval::*;
    use crate::lexer::{lex, Ident, Operator, Punct, Token};
    use crate::parser::parse;

    fn eval_str(input: &str, env: &mut Environment) -> Result<Value, EvalError> {
        let tokens = lex(input).expect("lex failed");
        let rpn = parse(tokens).expect("parse failed");
        evaluate(&rpn, env)
    }

    fn eval_fresh(input: &str) -> Result<Value, EvalError> {
        eval_str(input, &mut Environment::new())
    }

    #[test]
    fn eval_rpn_sum() {
        let rpn = vec![
            Token::Number(2.0),
            Token::Number(2.0),
            Token::Operator(Operator::Add),
        ];
        let mut env = Environment::new();
        assert_eq!(evaluate(&rpn, &mut env), Ok(Value::Number(4.0)));
    }

    #[test]
    fn eval_rpn_function() {
        let rpn = vec![
            Token::Number(54.0),
            Token::Number(3.0),
            Token::Operator(Operator::Less),
            Token::Number(6.0),
            Token::Number(9.0),
            Token::Ident(Ident::Function("IF".into())),
            Token::Number(20.0),
            Token::Operator(Operator::Add),
        ];
        let mut env = Environment::new();
        assert_eq!(evaluate(&rpn, &mut env), Ok(Value::Number(29.0)));
    }

    #[test]
    fn eval_precedence() {
        assert_eq!(eval_fresh("24 + 5 * (6 - 3 ^ 2 ^ 2)"), Ok(Value::Number(-351.0)));
        assert_eq!(eval_fresh("2 ^ 3 ^ 2"), Ok(Value::Number(512.0)));
        assert_eq!(eval_fresh("0.3 * 0.95"), Ok(Value::Number(0.3 * 0.95)));
    }

    #[test]
    fn eval_functions() {
        assert_eq!(eval_fresh("MAX(50, 10)"), Ok(Value::Number(50.0)));
        assert_eq!(eval_fresh("54 + SQRT(49)"), Ok(Value::Number(61.0)));
        assert_eq!(eval_fresh("54 + SQRT(49) * 8"), Ok(Value::Number(110.0)));
        assert_eq!(eval_fresh("IF(54 < 3, 6, 9) + 20"), Ok(Value::Number(29.0)));
        assert_eq!(eval_fresh("IF(54 > 3, 6, 9) + 20"), Ok(Value::Number(26.0)));
    }

    #[test]
    fn eval_comparisons_produce_booleans() {
        assert_eq!(eval_fresh("1 + 2 < 4"), Ok(Value::Bool(true)));
        assert_eq!(eval_fresh("5 > 3"), Ok(Value::Bool(true)));
        assert_eq!(eval_fresh("3 > 5"), Ok(Value::Bool(false)));
        assert_eq!(eval_fresh("2 * 3 = 6"), Ok(Value::Bool(true)));
    }

    #[test]
    fn eval_constants() {
        let expected = std::f64::consts::PI * 78.0 + std::f64::consts::E;
        assert_eq!(eval_fresh("$PI * 78 + $E"), Ok(Value::Number(expected)));
    }

    #[test]
    fn eval_set_then_read() {
        let mut env = Environment::new();
        assert_eq!(eval_str("SET(#FR, 45 + 50)", &mut env), Ok(Value::Number(95.0)));
        assert_eq!(eval_str("SET(#FR, $FR + 5)", &mut env), Ok(Value::Number(100.0)));
        assert_eq!(eval_str("$FR * 10", &mut env), Ok(Value::Number(1000.0)));
    }

    #[test]
    fn eval_set_boolean() {
        let mut env = Environment::new();
        assert_eq!(eval_str("SET(#OK, 1 < 2)", &mut env), Ok(Value::Bool(true)));
        assert_eq!(eval_str("IF($OK, 1, 2)", &mut env), Ok(Value::Number(1.0)));
    }

    #[test]
    fn eval_set_requires_key_sigil() {
        let mut env = Environment::new();
        env.set("FR", Value::Number(1.0));
        let err = eval_str("SET($FR, 2)", &mut env).unwrap_err();
        assert!(matches!(err, EvalError::TypeMismatch { .. }));
        assert_eq!(env.get("FR"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn eval_undefined_variable() {
        assert_eq!(
            eval_fresh("$NOPE + 1"),
            Err(EvalError::UndefinedVariable("NOPE".into()))
        );
        assert_eq!(
            eval_fresh("$$PI"),
            Err(EvalError::UndefinedVariable("$PI".into()))
        );
    }

    #[test]
    fn eval_undefined_function() {
        assert_eq!(
            eval_fresh("MIN(1, 2)"),
            Err(EvalError::UndefinedFunction("MIN".into()))
        );
    }

    #[test]
    fn eval_stack_underflow() {
        assert_eq!(eval_fresh("1 +"), Err(EvalError::StackUnderflow("+".into())));
        assert_eq!(eval_fresh("MAX(1)"), Err(EvalError::StackUnderflow("MAX".into())));
        assert_eq!(eval_fresh("IF(1, 2)"), Err(EvalError::StackUnderflow("IF".into())));
    }

    #[test]
    fn eval_trailing_operands() {
        assert_eq!(eval_fresh("1 2"), Err(EvalError::TrailingOperands(2)));
        assert_eq!(eval_fresh("SQRT(4, 9)"), Err(EvalError::TrailingOperands(2)));
    }

    #[test]
    fn eval_empty_expression() {
        assert_eq!(eval_fresh(""), Err(EvalError::EmptyExpression));
        assert_eq!(eval_fresh("   "), Err(EvalError::EmptyExpression));
    }

    #[test]
    fn eval_punctuation_is_undefined_operator() {
        let rpn = vec![
            Token::Number(1.0),
            Token::Punct(Punct::Comma),
        ];
        let mut env = Environment::new();
        assert_eq!(
            evaluate(&rpn, &mut env),
            Err(EvalError::UndefinedOperator(",".into()))
        );
    }

    #[test]
    fn eval_partial_effect_survives_fault() {
        let mut env = Environment::new();
        let err = eval_str("SET(#A, 7) + $MISSING", &mut env).unwrap_err();
        assert_eq!(err, EvalError::UndefinedVariable("MISSING".into()));
        assert_eq!(env.get("A"), Some(&Value::Number(7.0)));
    }

    #[test]
    fn eval_is_repeatable_without_set() {
        let mut env = Environment::new();
        let first = eval_str("$PI * 2 + MAX(3, SQRT(16))", &mut env);
        for _ in 0..5 {
            assert_eq!(eval_str("$PI * 2 + MAX(3, SQRT(16))", &mut env), first);
        }
    }

    #[test]
    fn eval_stack_is_per_call() {
        let mut env = Environment::new();
        let mut evaluator = Evaluator::new(&mut env);
        assert!(evaluator.eval(&[Token::Number(1.0), Token::Number(2.0)]).is_err());
        assert_eq!(evaluator.eval(&[Token::Number(3.0)]), Ok(Value::Number(3.0)));
    }

    #[test]
    fn eval_trace_mode_does_not_change_result() {
        let mut env = Environment::new();
        let rpn = parse(lex("MAX(50, 10) * 2").unwrap()).unwrap();
        let mut evaluator = Evaluator::new(&mut env);
        evaluator.set_trace_mode(true);
        assert_eq!(evaluator.eval(&rpn), Ok(Value::Number(100.0)));
    }
}
