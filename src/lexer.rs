//! Tokenization for formula expressions
//!
//! Tokens are the atomic elements of the infix surface syntax. The scanner
//! makes a single left-to-right pass and performs no grammar checks beyond
//! character classes: `$$PI` or `##` scan fine and are left for the later
//! stages to judge.

use crate::options::Options;
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{digit1, one_of},
    combinator::{map, map_opt, map_res, opt, recognize, verify},
    sequence::pair,
    IResult,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Binary operators, in the order of the scanner's symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    Add,     // +
    Sub,     // -
    Mul,     // *
    Div,     // /
    Pow,     // ^
    Less,    // <
    Greater, // >
    Equal,   // =
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
            Operator::Less => '<',
            Operator::Greater => '>',
            Operator::Equal => '=',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        Some(match c {
            '+' => Operator::Add,
            '-' => Operator::Sub,
            '*' => Operator::Mul,
            '/' => Operator::Div,
            '^' => Operator::Pow,
            '<' => Operator::Less,
            '>' => Operator::Greater,
            '=' => Operator::Equal,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Punct {
    LeftParen,
    RightParen,
    Comma,
}

impl Punct {
    pub fn symbol(self) -> char {
        match self {
            Punct::LeftParen => '(',
            Punct::RightParen => ')',
            Punct::Comma => ',',
        }
    }
}

/// An uppercase name, classified by its leading sigil.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Ident {
    /// Bare name: `MAX`, `SQRT`
    Function(String),
    /// `$NAME`, dereferenced against the environment at evaluation time
    Variable(String),
    /// `#NAME`, the literal name of a binding (first argument of `SET`)
    Key(String),
}

impl Ident {
    /// The name without its sigil
    pub fn name(&self) -> &str {
        match self {
            Ident::Function(n) | Ident::Variable(n) | Ident::Key(n) => n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Token {
    /// A numeric literal
    Number(f64),
    /// One of `+ - * / ^ < > =`
    Operator(Operator),
    /// One of `( ) ,`
    Punct(Punct),
    /// A function name, variable reference or variable key
    Ident(Ident),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::Punct(p) => write!(f, "{}", p.symbol()),
            Token::Ident(Ident::Function(name)) => write!(f, "{}", name),
            Token::Ident(Ident::Variable(name)) => write!(f, "${}", name),
            Token::Ident(Ident::Key(name)) => write!(f, "#{}", name),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },
}

fn is_sigil(c: char) -> bool {
    c == '$' || c == '#'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_uppercase() || is_sigil(c)
}

/// Keep the longest prefix of a digit/dot run that reads as a float:
/// everything before the second `.`, without a dangling `.`.
fn float_prefix(run: &str) -> &str {
    let end = run
        .char_indices()
        .filter(|&(_, c)| c == '.')
        .nth(1)
        .map_or(run.len(), |(i, _)| i);
    run[..end].trim_end_matches('.')
}

/// Parse a number: a digit followed by a greedy run of digits and dots
fn number(input: &str) -> IResult<&str, Token> {
    map_res(
        recognize(pair(
            digit1,
            take_while(|c: char| c.is_ascii_digit() || c == '.'),
        )),
        |run: &str| float_prefix(run).parse::<f64>().map(Token::Number),
    )(input)
}

/// Parse a single-character operator or punctuation symbol
fn symbol(input: &str) -> IResult<&str, Token> {
    map_opt(one_of("+-*/^<>=(),"), |c| match c {
        '(' => Some(Token::Punct(Punct::LeftParen)),
        ')' => Some(Token::Punct(Punct::RightParen)),
        ',' => Some(Token::Punct(Punct::Comma)),
        other => Operator::from_symbol(other).map(Token::Operator),
    })(input)
}

fn ident_token(run: &str) -> Token {
    let ident = if let Some(name) = run.strip_prefix('$') {
        Ident::Variable(name.to_string())
    } else if let Some(name) = run.strip_prefix('#') {
        Ident::Key(name.to_string())
    } else {
        Ident::Function(run.to_string())
    };
    Token::Ident(ident)
}

/// Parse a name: any run of `A-Z`, `$` and `#`
fn identifier(input: &str) -> IResult<&str, Token> {
    map(take_while1(is_name_char), ident_token)(input)
}

/// Parse a name with at most one leading sigil
fn strict_identifier(input: &str) -> IResult<&str, Token> {
    map(
        verify(
            recognize(pair(
                opt(one_of("$#")),
                take_while(|c: char| c.is_ascii_uppercase()),
            )),
            |run: &str| !run.is_empty(),
        ),
        ident_token,
    )(input)
}

/// Tokenize an expression with the default (compatible) options
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    lex_with(input, &Options::default())
}

/// Alias of [`lex`]
pub fn scan(input: &str) -> Result<Vec<Token>, LexError> {
    lex(input)
}

/// Tokenize an expression
///
/// Positions in errors are offsets into `input`. Every character the scanner
/// accepts is ASCII, so the byte offset of the first rejected character is
/// also its character offset.
pub fn lex_with(input: &str, options: &Options) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while let Some(ch) = rest.chars().next() {
        let position = input.len() - rest.len();

        if ch == ' ' {
            rest = &rest[1..];
            continue;
        }

        let scanned = if options.strict_identifiers {
            alt((number, symbol, strict_identifier))(rest)
        } else {
            alt((number, symbol, identifier))(rest)
        };

        let (after, token) =
            scanned.map_err(|_| LexError::InvalidCharacter { ch, position })?;

        if options.strict_identifiers && matches!(token, Token::Ident(_)) {
            if let Some(sigil) = after.chars().next().filter(|c| is_sigil(*c)) {
                return Err(LexError::InvalidCharacter {
                    ch: sigil,
                    position: input.len() - after.len(),
                });
            }
        }

        tokens.push(token);
        rest = after;
    }

    tracing::debug!(tokens = tokens.len(), "scanned expression");
    Ok(tokens)
}
