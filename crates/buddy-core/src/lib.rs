//! Buddy Core - the VoiceBuddy assistant's text-processing core
//!
//! Everything here is plain text in, typed values out. Audio capture,
//! speech recognition, speech synthesis, and the clipboard are external
//! shims; this crate never performs I/O.
//!
//! # Architecture
//!
//! ```text
//! heard text → Dispatcher → command routing → Outcome
//!                  ↓ ("calculate …")
//!              Normalizer → canonical arithmetic text
//!                  ↓
//!              Parser → whitelisted expression tree
//!                  ↓
//!              Evaluator → numeric result
//! ```
//!
//! # Guarantees
//!
//! - **Whitelisted**: only numeric literals, unary negation, and the five
//!   arithmetic operators are representable in a parsed tree. Identifiers,
//!   calls, strings, and statements are rejected during parsing, before any
//!   evaluation step runs.
//! - **Bounded**: nesting depth and expression length are capped, so
//!   adversarial input cannot exhaust the stack.
//! - **Stateless core**: normalizer, parser, and evaluator are pure
//!   functions, safe to call concurrently from any number of threads. The
//!   only state is the dispatcher's explicit conversation state.

pub mod dispatch;
pub mod error;
pub mod evaluator;
pub mod normalizer;
pub mod parser;

pub use dispatch::{Dispatcher, Outcome};
pub use error::{Error, Result};
pub use evaluator::{eval_expr, evaluate, format_number};
pub use normalizer::normalize;
pub use parser::ast::{BinaryOp, Expr};

/// Evaluate a spoken arithmetic phrase end to end.
///
/// Pipeline: normalize spoken operator words, parse under the whitelist
/// grammar, evaluate, render the value ("7", "3.5", "inf").
///
/// Caller contract: the phrase is already lower-cased with any leading
/// command phrase ("calculate ", "what is ", "what's ") stripped. The
/// returned string is the bare number; user-facing sentences and the
/// apology on error are the caller's responsibility.
///
/// # Errors
///
/// `Malformed`, `Unsupported`, or `TooComplex` from the parsing step.
pub fn compute_expression(spoken_phrase: &str) -> Result<String> {
    let canonical = normalizer::normalize(spoken_phrase);
    let value = evaluator::evaluate(&canonical)?;
    Ok(evaluator::format_number(value))
}
