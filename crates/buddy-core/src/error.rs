//! Error types for the VoiceBuddy expression core
//!
//! All fallible operations return `Result<T, Error>`.
//! Every error is terminal for a single evaluation attempt: there is no
//! retry or partial recovery, and the caller decides user-facing messaging.

/// Expression evaluation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Input cannot be tokenized or parsed as a well-formed expression
    /// (unbalanced parentheses, empty operand, trailing operator)
    #[error("malformed expression: {0}")]
    Malformed(String),

    /// Input references a construct outside the whitelist grammar
    /// (identifier, call, string, statement)
    #[error("unsupported construct: {0}")]
    Unsupported(String),

    /// Nesting or length exceeds the configured safety bound
    #[error("expression too complex: {0}")]
    TooComplex(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Malformed("unexpected trailing operator".to_string());
        assert_eq!(
            err.to_string(),
            "malformed expression: unexpected trailing operator"
        );

        let err = Error::Unsupported("identifier 'open'".to_string());
        assert_eq!(err.to_string(), "unsupported construct: identifier 'open'");

        let err = Error::TooComplex("nesting depth 65 exceeds limit of 64".to_string());
        assert_eq!(
            err.to_string(),
            "expression too complex: nesting depth 65 exceeds limit of 64"
        );
    }
}
