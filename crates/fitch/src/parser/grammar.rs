//! Precedence-climbing parser over the token stream
//!
//! Binding, tightest first: `¬`, quantifiers, `∧`, `∨`, `→`, `↔`. Every
//! binary connective is left-associative, `→` included. A quantifier's body
//! runs to the end of the enclosing formula unless parenthesized.

use super::tokenizer::{tokenize, Token};
use crate::error::ParseError;
use crate::logic::{is_variable_name, Connective, Formula, Predicate, Quantifier, Term, Variable};

/// Binary connectives from loosest to tightest
const PRECEDENCE: [Connective; 4] = [
    Connective::Iff,
    Connective::Implies,
    Connective::Or,
    Connective::And,
];

/// Deepest nesting of parentheses, negations and quantifiers accepted
pub const MAX_DEPTH: usize = 128;

static EOF: Token = Token::Eof;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    // Runs `f` one nesting level deeper, failing past MAX_DEPTH.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep);
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn match_symbol(&mut self, sym: char) -> bool {
        if *self.current() == Token::Symbol(sym) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_symbol(&mut self, sym: char) -> Result<(), ParseError> {
        if self.match_symbol(sym) {
            Ok(())
        } else {
            Err(ParseError::ExpectedSymbol {
                expected: sym,
                found: self.current().to_string(),
            })
        }
    }

    pub fn expect_eof(&self) -> Result<(), ParseError> {
        match self.current() {
            Token::Eof => Ok(()),
            _ => Err(ParseError::TrailingInput),
        }
    }

    pub fn parse_formula(&mut self) -> Result<Formula, ParseError> {
        self.parse_binary(0)
    }

    fn parse_binary(&mut self, level: usize) -> Result<Formula, ParseError> {
        let Some(&connective) = PRECEDENCE.get(level) else {
            return self.parse_unary();
        };

        let mut left = self.parse_binary(level + 1)?;
        while self.match_symbol(connective.symbol()) {
            let right = self.parse_binary(level + 1)?;
            left = Formula::binary(connective, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Formula, ParseError> {
        if self.match_symbol('¬') {
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Formula::not(operand));
        }
        if self.match_symbol('∀') {
            return self.nested(|p| p.parse_quantified(Quantifier::Forall));
        }
        if self.match_symbol('∃') {
            return self.nested(|p| p.parse_quantified(Quantifier::Exists));
        }
        self.parse_primary()
    }

    // Called with the quantifier symbol already consumed.
    fn parse_quantified(&mut self, quantifier: Quantifier) -> Result<Formula, ParseError> {
        let variable = match self.current() {
            Token::Identifier(name) if is_variable_name(name) => Variable::new(name.as_str()),
            Token::Eof => return Err(ParseError::UnexpectedEnd),
            other => return Err(ParseError::ExpectedVariable(other.to_string())),
        };
        self.advance();

        let body = self.parse_formula()?;
        Ok(Formula::quantified(quantifier, variable, body))
    }

    fn parse_primary(&mut self) -> Result<Formula, ParseError> {
        match self.current() {
            Token::Symbol('(') => {
                self.advance();
                let inner = self.nested(Self::parse_formula)?;
                self.expect_symbol(')')?;
                Ok(inner)
            }
            Token::Identifier(_) => self.parse_predicate().map(Formula::Predicate),
            Token::Bottom => {
                self.advance();
                Ok(Formula::Bottom)
            }
            Token::Eof => Err(ParseError::UnexpectedEnd),
            other => Err(ParseError::UnexpectedToken(other.to_string())),
        }
    }

    fn parse_predicate(&mut self) -> Result<Predicate, ParseError> {
        let name = match self.current() {
            Token::Identifier(name) => name.clone(),
            other => return Err(ParseError::UnexpectedToken(other.to_string())),
        };
        self.advance();

        let mut args = Vec::new();
        if self.match_symbol('(') && !self.match_symbol(')') {
            loop {
                let term = match self.current() {
                    Token::Identifier(arg) => Term::from_identifier(arg),
                    _ => return Err(ParseError::ExpectedTerm),
                };
                self.advance();
                args.push(term);

                if !self.match_symbol(',') {
                    break;
                }
            }
            self.expect_symbol(')')?;
        }

        Ok(Predicate::new(name, args))
    }
}

/// Parse a complete formula, rejecting trailing input
pub fn parse_formula(input: &str) -> Result<Formula, ParseError> {
    let mut parser = Parser::new(tokenize(input));
    let formula = parser.parse_formula()?;
    parser.expect_eof()?;
    Ok(formula)
}
