//! Expression tokenizer: converts normalized text into a token stream
//!
//! Recognizes only the tokens of the whitelist grammar: numeric literals,
//! the five arithmetic operators, and parentheses. Constructs that a more
//! general expression language would accept (identifiers, calls, strings,
//! statements, comparisons, collections) are rejected here, at the token
//! level, so no evaluation of such input is ever attempted.
//!
//! Guarantees:
//! - Deterministic: same input always produces same token stream
//! - Complete error reporting: line:column for every error

/// Token types for the arithmetic expression grammar
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal, integer or decimal
    Number(f64),

    // Operators
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    StarStar, // **

    // Grouping
    LParen, // (
    RParen, // )

    Eof,
}

/// Position in source text for error reporting
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token with source position
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Tokenizer for normalized arithmetic text
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Tokenizer {
    /// Create a new tokenizer for the given input text
    pub fn new(text: &str) -> Self {
        Tokenizer {
            input: text.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input into a stream of spanned tokens
    pub fn tokenize(&mut self) -> crate::Result<Vec<SpannedToken>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(SpannedToken {
                    token: Token::Eof,
                    span: self.current_span(),
                });
                break;
            }

            let token = self.next_token()?;
            tokens.push(token);
        }

        Ok(tokens)
    }

    // ── Character helpers ──────────────────────────────────

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied();
        if let Some(c) = ch {
            self.position += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    fn current_span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
            offset: self.position,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    // ── Main dispatch ──────────────────────────────────────

    fn next_token(&mut self) -> crate::Result<SpannedToken> {
        let span = self.current_span();
        let ch = self.peek().unwrap();

        match ch {
            '+' => { self.advance(); Ok(SpannedToken { token: Token::Plus, span }) }
            '-' => { self.advance(); Ok(SpannedToken { token: Token::Minus, span }) }
            '*' => {
                self.advance();
                if self.peek() == Some('*') {
                    self.advance();
                    Ok(SpannedToken { token: Token::StarStar, span })
                } else {
                    Ok(SpannedToken { token: Token::Star, span })
                }
            }
            '/' => { self.advance(); Ok(SpannedToken { token: Token::Slash, span }) }
            '(' => { self.advance(); Ok(SpannedToken { token: Token::LParen, span }) }
            ')' => { self.advance(); Ok(SpannedToken { token: Token::RParen, span }) }
            c if c.is_ascii_digit() => self.read_number(span),
            '.' if self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number(span)
            }
            // Disallowed but recognizable constructs. Naming them makes the
            // rejection reason precise without ever building a node for them.
            c if c.is_ascii_alphabetic() || c == '_' => self.reject_identifier(span),
            '"' | '\'' => Err(crate::Error::Unsupported(format!(
                "string literal at {}",
                span
            ))),
            ';' => Err(crate::Error::Unsupported(format!(
                "statement separator ';' at {}",
                span
            ))),
            '=' | '<' | '>' | '!' => Err(crate::Error::Unsupported(format!(
                "comparison or assignment operator '{}' at {}",
                ch, span
            ))),
            ',' => Err(crate::Error::Unsupported(format!(
                "argument list ',' at {}",
                span
            ))),
            '[' | ']' | '{' | '}' => Err(crate::Error::Unsupported(format!(
                "collection literal '{}' at {}",
                ch, span
            ))),
            '%' | '&' | '|' | '^' | '~' | '@' => Err(crate::Error::Unsupported(format!(
                "operator '{}' at {}",
                ch, span
            ))),
            _ => Err(crate::Error::Malformed(format!(
                "unexpected character '{}' at {}",
                ch, span
            ))),
        }
    }

    // ── Numbers ────────────────────────────────────────────

    fn read_number(&mut self, span: Span) -> crate::Result<SpannedToken> {
        let start = self.position;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.input[start..self.position].iter().collect();
        let value: f64 = text.parse().map_err(|_| {
            crate::Error::Malformed(format!("invalid number '{}' at {}", text, span))
        })?;

        Ok(SpannedToken {
            token: Token::Number(value),
            span,
        })
    }

    // ── Identifiers (always rejected) ──────────────────────

    fn reject_identifier(&mut self, span: Span) -> crate::Result<SpannedToken> {
        let start = self.position;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.input[start..self.position].iter().collect();
        Err(crate::Error::Unsupported(format!(
            "identifier '{}' at {}",
            text, span
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn tokenize(input: &str) -> Vec<Token> {
        Tokenizer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|st| st.token)
            .collect()
    }

    fn tokenize_err(input: &str) -> Error {
        Tokenizer::new(input).tokenize().unwrap_err()
    }

    // ── Numbers ────────────────────────────────────────

    #[test]
    fn test_tokenize_integers() {
        let tokens = tokenize("42 0 999999");
        assert_eq!(tokens, vec![
            Token::Number(42.0),
            Token::Number(0.0),
            Token::Number(999999.0),
            Token::Eof,
        ]);
    }

    #[test]
    fn test_tokenize_decimals() {
        let tokens = tokenize("3.14 0.5 .5");
        assert_eq!(tokens, vec![
            Token::Number(3.14),
            Token::Number(0.5),
            Token::Number(0.5),
            Token::Eof,
        ]);
    }

    #[test]
    fn test_tokenize_double_dot_number() {
        let err = tokenize_err("1.2.3");
        assert!(matches!(err, Error::Malformed(_)), "got {:?}", err);
    }

    // ── Operators ──────────────────────────────────────

    #[test]
    fn test_tokenize_operators() {
        let tokens = tokenize("+ - * / **");
        assert_eq!(tokens, vec![
            Token::Plus,
            Token::Minus,
            Token::Star,
            Token::Slash,
            Token::StarStar,
            Token::Eof,
        ]);
    }

    #[test]
    fn test_tokenize_star_star_without_spaces() {
        let tokens = tokenize("2**3");
        assert_eq!(tokens, vec![
            Token::Number(2.0),
            Token::StarStar,
            Token::Number(3.0),
            Token::Eof,
        ]);
    }

    #[test]
    fn test_tokenize_parens() {
        let tokens = tokenize("(1 + 2)");
        assert_eq!(tokens, vec![
            Token::LParen,
            Token::Number(1.0),
            Token::Plus,
            Token::Number(2.0),
            Token::RParen,
            Token::Eof,
        ]);
    }

    // ── Whitelist rejections ───────────────────────────

    #[test]
    fn test_reject_identifier() {
        let err = tokenize_err("__import__");
        match err {
            Error::Unsupported(msg) => assert!(msg.contains("identifier '__import__'")),
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_identifier_after_number() {
        let err = tokenize_err("2abc");
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn test_reject_string_literals() {
        assert!(matches!(tokenize_err("'os'"), Error::Unsupported(_)));
        assert!(matches!(tokenize_err("\"os\""), Error::Unsupported(_)));
    }

    #[test]
    fn test_reject_statement_separator() {
        let err = tokenize_err("1; 2");
        match err {
            Error::Unsupported(msg) => assert!(msg.contains("statement separator")),
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_comparison_operators() {
        assert!(matches!(tokenize_err("1 < 2"), Error::Unsupported(_)));
        assert!(matches!(tokenize_err("1 > 2"), Error::Unsupported(_)));
        assert!(matches!(tokenize_err("x = 2"), Error::Unsupported(_)));
        assert!(matches!(tokenize_err("1 != 2"), Error::Unsupported(_)));
    }

    #[test]
    fn test_reject_collections() {
        assert!(matches!(tokenize_err("[1, 2]"), Error::Unsupported(_)));
        assert!(matches!(tokenize_err("{}"), Error::Unsupported(_)));
    }

    #[test]
    fn test_reject_bitwise_and_modulo_operators() {
        assert!(matches!(tokenize_err("1 % 2"), Error::Unsupported(_)));
        assert!(matches!(tokenize_err("1 & 2"), Error::Unsupported(_)));
        assert!(matches!(tokenize_err("1 | 2"), Error::Unsupported(_)));
        assert!(matches!(tokenize_err("1 ^ 2"), Error::Unsupported(_)));
        assert!(matches!(tokenize_err("~1"), Error::Unsupported(_)));
    }

    #[test]
    fn test_reject_unknown_character() {
        let err = tokenize_err("1 ? 2");
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn test_reject_bare_dot() {
        let err = tokenize_err(".");
        assert!(matches!(err, Error::Malformed(_)));
    }

    // ── Span tracking ──────────────────────────────────

    #[test]
    fn test_span_tracking() {
        let tokens = Tokenizer::new("1 + 22").tokenize().unwrap();
        assert_eq!(tokens[0].span, Span { line: 1, column: 1, offset: 0 });
        assert_eq!(tokens[0].token, Token::Number(1.0));
        assert_eq!(tokens[1].span, Span { line: 1, column: 3, offset: 2 });
        assert_eq!(tokens[1].token, Token::Plus);
        assert_eq!(tokens[2].span, Span { line: 1, column: 5, offset: 4 });
        assert_eq!(tokens[2].token, Token::Number(22.0));
    }

    #[test]
    fn test_error_reports_position() {
        let err = tokenize_err("1 + open");
        assert!(err.to_string().contains("1:5"), "got: {}", err);
    }

    // ── Edge cases ─────────────────────────────────────

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens, vec![Token::Eof]);
    }

    #[test]
    fn test_only_whitespace() {
        let tokens = tokenize("   \t  ");
        assert_eq!(tokens, vec![Token::Eof]);
    }

    // ── Determinism ────────────────────────────────────

    #[test]
    fn test_tokenize_determinism_100_iterations() {
        let input = "-(2 + 3.5) * 4 ** 2 / 7";
        let first = Tokenizer::new(input).tokenize().unwrap();
        for i in 0..100 {
            let result = Tokenizer::new(input).tokenize().unwrap();
            assert_eq!(first, result, "Determinism failure at iteration {}", i);
        }
    }
}
