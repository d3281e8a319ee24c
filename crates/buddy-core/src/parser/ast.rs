//! Expression tree node definitions
//!
//! The `Expr` enum is the whitelist: only numeric literals, unary negation,
//! and the five binary operators are representable. The evaluator matches
//! exhaustively over it, so the compiler proves every node kind is handled;
//! there is no catch-all rejection path to forget a case in.
//!
//! Trees are built fresh per input by the parser, never mutated after
//! construction, consumed once by the evaluator, then discarded.

/// The five whitelisted binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    /// The symbolic spelling of the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Power => "**",
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A parsed arithmetic expression
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// Unary negation
    Negate(Box<Expr>),
    /// Binary operation
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl std::fmt::Display for Expr {
    /// Renders the tree in fully parenthesized form, making the parsed
    /// structure visible: `2 + 3 * 4` prints as `(2 + (3 * 4))`.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{}", value),
            Expr::Negate(operand) => write!(f, "(-{})", operand),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
        }
    }
}
