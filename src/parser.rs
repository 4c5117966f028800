//! Parser for formula expressions
//!
//! Reorders infix tokens into postfix (RPN) with the shunting-yard
//! algorithm. The output uses the same token alphabet as the scanner, minus
//! punctuation, so the evaluator can run it with one stack pass.
//!
//! Function calls need two extensions to the textbook algorithm:
//! - a function name waits on the operator stack and always loses to the
//!   next operator, which flushes it right after its closing `)`;
//! - `,` flushes the finished argument but keeps the call's `(` open.

use crate::ast::Rpn;
use crate::lexer::{Ident, Operator, Punct, Token};
use crate::options::Options;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unparsed token {token} at position {index}")]
    UnparsedToken { token: Token, index: usize },
    #[error("Unbalanced parenthesis at position {index}")]
    UnbalancedParenthesis { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Binding strength: `^` over `* /` over `+ -` over `< > =`
pub fn precedence(op: Operator) -> u8 {
    match op {
        Operator::Pow => 3,
        Operator::Mul | Operator::Div => 2,
        Operator::Add | Operator::Sub => 1,
        Operator::Less | Operator::Greater | Operator::Equal => 0,
    }
}

pub fn associativity(op: Operator) -> Associativity {
    match op {
        Operator::Pow => Associativity::Right,
        _ => Associativity::Left,
    }
}

/// An entry waiting on the operator stack
#[derive(Debug, Clone, PartialEq)]
enum Pending {
    Operator(Operator),
    Function(String),
    /// Remembers where the `(` was for error reporting
    LeftParen(usize),
}

impl Pending {
    /// Should this entry be emitted before `incoming` is pushed?
    fn yields_to(&self, incoming: Operator) -> bool {
        match self {
            Pending::Function(_) => true,
            Pending::LeftParen(_) => false,
            Pending::Operator(top) => {
                let (top, next) = (precedence(*top), precedence(incoming));
                top > next || (top == next && associativity(incoming) == Associativity::Left)
            }
        }
    }
}

/// Parser state
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    options: Options,
    operators: Vec<Pending>,
    output: Vec<Token>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, Options::default())
    }

    pub fn with_options(tokens: Vec<Token>, options: Options) -> Self {
        Parser {
            tokens,
            pos: 0,
            options,
            operators: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Consume and return the current token with its index
    fn advance(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.pos).cloned()?;
        let index = self.pos;
        self.pos += 1;
        Some((index, token))
    }

    /// Convert the whole token sequence to RPN
    pub fn parse(mut self) -> Result<Vec<Token>, ParseError> {
        while let Some((index, token)) = self.advance() {
            match token {
                Token::Number(_) => self.output.push(token),
                Token::Ident(ref ident) if ident.name().is_empty() => {
                    return Err(ParseError::UnparsedToken { token, index });
                }
                Token::Ident(Ident::Variable(_)) | Token::Ident(Ident::Key(_)) => {
                    self.output.push(token)
                }
                Token::Ident(Ident::Function(name)) => self.push_function(name),
                Token::Operator(op) => self.push_operator(op),
                Token::Punct(Punct::LeftParen) => self.operators.push(Pending::LeftParen(index)),
                Token::Punct(Punct::RightParen) => self.close_paren(index)?,
                Token::Punct(Punct::Comma) => self.separate_argument(index)?,
            }
        }
        self.finish()
    }

    fn emit(&mut self, pending: Pending) {
        match pending {
            Pending::Operator(op) => self.output.push(Token::Operator(op)),
            Pending::Function(name) => self.output.push(Token::Ident(Ident::Function(name))),
            Pending::LeftParen(_) => {}
        }
    }

    fn push_operator(&mut self, op: Operator) {
        while let Some(top) = self.operators.pop() {
            if !top.yields_to(op) {
                self.operators.push(top);
                break;
            }
            self.emit(top);
        }
        self.operators.push(Pending::Operator(op));
    }

    /// Names have no precedence against operators, only against other names
    fn push_function(&mut self, name: String) {
        while let Some(top) = self.operators.pop() {
            if !matches!(top, Pending::Function(_)) {
                self.operators.push(top);
                break;
            }
            self.emit(top);
        }
        self.operators.push(Pending::Function(name));
    }

    /// Emit everything above the nearest `(`. Returns false if there is none.
    fn unwind_to_paren(&mut self) -> bool {
        while let Some(top) = self.operators.pop() {
            if let Pending::LeftParen(_) = top {
                self.operators.push(top);
                return true;
            }
            self.emit(top);
        }
        false
    }

    /// `)` discards its `(` but leaves a function name below it pending
    fn close_paren(&mut self, index: usize) -> Result<(), ParseError> {
        if self.unwind_to_paren() {
            self.operators.pop();
        } else if self.options.strict_parens {
            return Err(ParseError::UnbalancedParenthesis { index });
        }
        Ok(())
    }

    fn separate_argument(&mut self, index: usize) -> Result<(), ParseError> {
        if !self.unwind_to_paren() && self.options.strict_parens {
            return Err(ParseError::UnbalancedParenthesis { index });
        }
        Ok(())
    }

    /// Flush the operator stack, outermost entry last
    fn finish(mut self) -> Result<Vec<Token>, ParseError> {
        while let Some(top) = self.operators.pop() {
            if let Pending::LeftParen(index) = top {
                if self.options.strict_parens {
                    return Err(ParseError::UnbalancedParenthesis { index });
                }
            }
            self.emit(top);
        }
        tracing::debug!(rpn = %Rpn(&self.output), "converted to postfix");
        Ok(self.output)
    }
}

/// Convert infix tokens to RPN with the default (permissive) options
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    Parser::new(tokens).parse()
}

pub fn parse_with(tokens: Vec<Token>, options: &Options) -> Result<Vec<Token>, ParseError> {
    Parser::with_options(tokens, *options).parse()
}
