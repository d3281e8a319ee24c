//! Phrase normalizer: rewrites spoken operator words into symbols
//!
//! Converts free-form arithmetic phrases ("3 plus 4", "2 to the power of 3")
//! into canonical symbolic text the parser understands. This is a leaf
//! component with no failure modes: it always returns a string, possibly
//! malformed. Validation is entirely the evaluator's responsibility.
//!
//! # Guarantees
//!
//! - **Total**: no error cases
//! - **Deterministic**: same input always produces same output
//! - **Idempotent on canonical input**: `normalize("2 + 3") == "2 + 3"`

/// Ordered substitution table mapping spelled-out operator phrases to their
/// symbolic equivalents. Order matters for overlapping phrases: the longer
/// " to the power of " must be rewritten before " power of ", otherwise a
/// dangling "to the" fragment would be left in the expression.
const REPLACEMENTS: &[(&str, &str)] = &[
    (" plus ", " + "),
    (" minus ", " - "),
    (" times ", " * "),
    (" multiplied by ", " * "),
    (" divided by ", " / "),
    (" over ", " / "),
    (" to the power of ", " ** "),
    (" power of ", " ** "),
];

/// Filler words removed after substitution; "3 plus 4 equals" is treated
/// the same as "3 plus 4".
const FILLERS: &[&str] = &[" equals", " equal"];

/// Normalize a spoken arithmetic phrase into symbolic form.
///
/// Input is expected to be lower-cased by the caller, with any leading
/// command phrase ("calculate ", "what is ", "what's ") already stripped.
/// The output is best-effort symbolic text; no validation happens here.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.to_string();
    for (phrase, symbol) in REPLACEMENTS {
        text = text.replace(phrase, symbol);
    }
    for filler in FILLERS {
        text = text.replace(filler, "");
    }
    text
}
