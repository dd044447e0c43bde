//! Tokenizer for formula text
//!
//! Produces a fully materialized token vector ending in `Token::Eof`.
//! Characters that start no token are dropped without complaint; reporting
//! bad input is left to the parser.

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, one_of, satisfy},
    combinator::{map, recognize, value},
    sequence::pair,
    IResult,
};
use std::fmt;

/// Connective, quantifier and punctuation characters
pub const SYMBOLS: &str = "¬∧∨→↔∃∀(),";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Identifier(String),
    Symbol(char),
    Bottom,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Symbol(c) => write!(f, "{}", c),
            Token::Bottom => write!(f, "⊥"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        match token(rest) {
            Ok((next, tok)) => {
                tokens.push(tok);
                rest = next;
            }
            Err(_) => {
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str();
            }
        }
        rest = rest.trim_start();
    }

    tokens.push(Token::Eof);
    tokens
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((identifier, bottom, symbol))(input)
}

fn identifier(input: &str) -> IResult<&str, Token> {
    map(
        recognize(pair(
            satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        )),
        |name: &str| Token::Identifier(name.to_string()),
    )(input)
}

fn bottom(input: &str) -> IResult<&str, Token> {
    value(Token::Bottom, char('⊥'))(input)
}

fn symbol(input: &str) -> IResult<&str, Token> {
    map(one_of(SYMBOLS), Token::Symbol)(input)
}
