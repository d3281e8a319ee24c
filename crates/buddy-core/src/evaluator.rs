//! Safe expression evaluator
//!
//! One-shot parse then evaluate pipeline. The whitelist and the nesting
//! bounds are enforced during parsing, before any evaluation step runs, so
//! evaluation itself is a total fold over the closed tree: it cannot fail
//! and touches no state outside the call.
//!
//! # Division by zero
//!
//! Arithmetic follows IEEE-754 double-precision semantics throughout.
//! `1 / 0` evaluates to infinity and `0 / 0` to NaN; there is no separate
//! division-by-zero error.

use crate::parser;
use crate::parser::ast::{BinaryOp, Expr};
use crate::Result;

/// Evaluate normalized arithmetic text to a numeric value.
///
/// # Errors
///
/// `Malformed`, `Unsupported`, or `TooComplex` from the parsing step.
/// A successfully parsed expression always evaluates.
pub fn evaluate(text: &str) -> Result<f64> {
    let expr = parser::parse(text)?;
    Ok(eval_expr(&expr))
}

/// Compute the numeric value of an expression tree, bottom-up.
///
/// Total function: every node kind of the closed `Expr` enum is handled,
/// and IEEE-754 semantics mean no arithmetic raises.
pub fn eval_expr(expr: &Expr) -> f64 {
    match expr {
        Expr::Number(value) => *value,
        Expr::Negate(operand) => -eval_expr(operand),
        Expr::Binary { op, lhs, rhs } => {
            let left = eval_expr(lhs);
            let right = eval_expr(rhs);
            match op {
                BinaryOp::Add => left + right,
                BinaryOp::Subtract => left - right,
                BinaryOp::Multiply => left * right,
                BinaryOp::Divide => left / right,
                BinaryOp::Power => left.powf(right),
            }
        }
    }
}

/// Render a result the way it is spoken: integral values without the
/// trailing ".0" ("The answer is 7", not "7.0").
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    // ── Literal round-trip ─────────────────────────────

    #[test]
    fn test_evaluate_literals() {
        assert_eq!(evaluate("42").unwrap(), 42.0);
        assert_eq!(evaluate("3.25").unwrap(), "3.25".parse::<f64>().unwrap());
        assert_eq!(evaluate("0.5").unwrap(), 0.5);
    }

    // ── Arithmetic ─────────────────────────────────────

    #[test]
    fn test_evaluate_basic_operators() {
        assert_eq!(evaluate("3 + 4").unwrap(), 7.0);
        assert_eq!(evaluate("10 - 2").unwrap(), 8.0);
        assert_eq!(evaluate("6 * 7").unwrap(), 42.0);
        assert_eq!(evaluate("8 / 2").unwrap(), 4.0);
        assert_eq!(evaluate("2 ** 10").unwrap(), 1024.0);
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("2 * 3 + 4").unwrap(), 10.0);
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
    }

    #[test]
    fn test_evaluate_power_right_associative() {
        assert_eq!(evaluate("2 ** 3 ** 2").unwrap(), 512.0);
    }

    #[test]
    fn test_evaluate_unary_negation_composes() {
        assert_eq!(evaluate("-(2 + 3)").unwrap(), -5.0);
        assert_eq!(evaluate("--5").unwrap(), 5.0);
        assert_eq!(evaluate("-2 ** 2").unwrap(), -4.0);
    }

    #[test]
    fn test_evaluate_fractional_results() {
        assert_eq!(evaluate("7 / 2").unwrap(), 3.5);
        assert_eq!(evaluate("2 ** -1").unwrap(), 0.5);
    }

    // ── Division by zero follows IEEE-754 ──────────────

    #[test]
    fn test_divide_by_zero_is_infinity() {
        assert_eq!(evaluate("1 / 0").unwrap(), f64::INFINITY);
        assert_eq!(evaluate("-1 / 0").unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_zero_over_zero_is_nan() {
        assert!(evaluate("0 / 0").unwrap().is_nan());
    }

    // ── Whitelist rejection, never a value ─────────────

    #[test]
    fn test_evaluate_rejects_code() {
        assert!(matches!(
            evaluate("__import__('os')").unwrap_err(),
            Error::Unsupported(_)
        ));
        assert!(matches!(
            evaluate("open('x')").unwrap_err(),
            Error::Unsupported(_)
        ));
        assert!(matches!(evaluate("1; 2").unwrap_err(), Error::Unsupported(_)));
    }

    #[test]
    fn test_evaluate_rejects_malformed() {
        assert!(matches!(evaluate("2 +").unwrap_err(), Error::Malformed(_)));
        assert!(matches!(evaluate("").unwrap_err(), Error::Malformed(_)));
    }

    // ── Result formatting ──────────────────────────────

    #[test]
    fn test_format_number_integral() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(1024.0), "1024");
    }

    #[test]
    fn test_format_number_fractional() {
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.25), "0.25");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_number_large_magnitude_stays_float() {
        // Past 2^53 the i64 shortcut would lose precision
        assert_eq!(format_number(1e16), "10000000000000000");
    }

    // ── Determinism ────────────────────────────────────

    #[test]
    fn test_evaluate_determinism_100_iterations() {
        let input = "-(2 + 3.5) * 4 ** 2 / 7";
        let first = evaluate(input).unwrap();
        for i in 0..100 {
            assert_eq!(first, evaluate(input).unwrap(), "Determinism failure at iteration {}", i);
        }
    }
}
