//! Expression parser: recursive descent over the whitelist grammar
//!
//! Converts normalized arithmetic text into an expression tree. The grammar
//! recognizes nothing but the whitelisted productions, so unsupported
//! constructs are syntax errors rather than runtime denylist checks.
//!
//! # Grammar
//!
//! ```text
//! expression := term   (("+" | "-") term)*          left-associative
//! term       := factor (("*" | "/") factor)*        left-associative
//! factor     := "-" factor | power
//! power      := atom ("**" factor)?                 right-associative
//! atom       := NUMBER | "(" expression ")"
//! ```
//!
//! `**` binds tighter than unary minus (`-2 ** 2` is `-(2 ** 2)`) and its
//! right operand re-enters `factor` so exponents may be negated (`2 ** -3`).
//!
//! # Bounds
//!
//! Structural nesting (parentheses, unary chains, power chains) is capped at
//! [`MAX_DEPTH`] and total expression size at [`MAX_TOKENS`]. Both bounds
//! fail with `TooComplex` before any deep recursion happens, during parsing
//! or the evaluation that follows.

pub mod ast;
pub mod tokenizer;

use crate::{Error, Result};
use ast::{BinaryOp, Expr};
use tokenizer::{Span, SpannedToken, Token, Tokenizer};

/// Maximum structural nesting depth of an expression
pub const MAX_DEPTH: usize = 64;

/// Maximum number of tokens in a single expression
pub const MAX_TOKENS: usize = 1024;

/// Parse normalized arithmetic text into an expression tree.
///
/// # Errors
///
/// - `Malformed` for text that cannot be tokenized or parsed as a
///   well-formed expression
/// - `Unsupported` for constructs outside the whitelist grammar
/// - `TooComplex` when nesting or length exceeds the safety bounds
pub fn parse(text: &str) -> Result<Expr> {
    let tokens = Tokenizer::new(text).tokenize()?;
    if tokens.len() > MAX_TOKENS {
        return Err(Error::TooComplex(format!(
            "{} tokens exceeds limit of {}",
            tokens.len(),
            MAX_TOKENS
        )));
    }

    let mut parser = Parser {
        tokens,
        position: 0,
        depth: 0,
    };
    let expr = parser.parse_expression()?;
    parser.expect_eof()?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<SpannedToken>,
    position: usize,
    depth: usize,
}

impl Parser {
    // ── Token helpers ──────────────────────────────────────

    fn peek(&self) -> &Token {
        &self.tokens[self.position].token
    }

    fn span(&self) -> &Span {
        &self.tokens[self.position].span
    }

    fn advance(&mut self) -> &Token {
        let token = &self.tokens[self.position].token;
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        token
    }

    fn expect_eof(&self) -> Result<()> {
        match self.peek() {
            Token::Eof => Ok(()),
            token => Err(Error::Malformed(format!(
                "unexpected {} after end of expression at {}",
                describe(token),
                self.span()
            ))),
        }
    }

    // ── Depth guard ────────────────────────────────────────

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::TooComplex(format!(
                "nesting depth {} exceeds limit of {}",
                self.depth, MAX_DEPTH
            )));
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    // ── Grammar productions ────────────────────────────────

    fn parse_expression(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_factor()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinaryOp::Multiply,
                Token::Slash => BinaryOp::Divide,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_factor()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        if matches!(self.peek(), Token::Minus) {
            self.advance();
            self.descend()?;
            let operand = self.parse_factor()?;
            self.ascend();
            return Ok(Expr::Negate(Box::new(operand)));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_atom()?;
        if matches!(self.peek(), Token::StarStar) {
            self.advance();
            self.descend()?;
            // Right operand re-enters factor: right-associative, and the
            // exponent may carry a unary minus.
            let exponent = self.parse_factor()?;
            self.ascend();
            return Ok(Expr::Binary {
                op: BinaryOp::Power,
                lhs: Box::new(base),
                rhs: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        match self.peek().clone() {
            Token::Number(value) => {
                self.advance();
                Ok(Expr::Number(value))
            }
            Token::LParen => {
                let open_span = self.span().clone();
                self.advance();
                self.descend()?;
                let inner = self.parse_expression()?;
                self.ascend();
                match self.peek() {
                    Token::RParen => {
                        self.advance();
                        Ok(inner)
                    }
                    _ => Err(Error::Malformed(format!(
                        "unclosed parenthesis opened at {}",
                        open_span
                    ))),
                }
            }
            Token::Eof => Err(Error::Malformed(
                "expected a number or '(' but found end of input".to_string(),
            )),
            token => Err(Error::Malformed(format!(
                "expected a number or '(' but found {} at {}",
                describe(&token),
                self.span()
            ))),
        }
    }
}

/// Human-readable token name for error messages
fn describe(token: &Token) -> String {
    match token {
        Token::Number(value) => format!("number '{}'", value),
        Token::Plus => "'+'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Star => "'*'".to_string(),
        Token::Slash => "'/'".to_string(),
        Token::StarStar => "'**'".to_string(),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
        Token::Eof => "end of input".to_string(),
    }
}
