//! Command dispatcher: routes heard text to typed outcomes
//!
//! Pure text-in, outcome-out command routing. The dispatcher performs no
//! I/O: speaking, opening URLs, clipboard writes, and the clock are the
//! caller's shims, requested through [`Outcome`] variants. State the
//! original assistant kept in a process-wide global (the last generated
//! text) lives here as an explicit field, one dispatcher per conversation.
//!
//! Evaluator errors never leak into spoken replies; a failed calculation
//! always yields the same fixed apology.

use crate::compute_expression;

/// The assistant's fixed joke list
pub const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything.",
    "I told my computer I needed a break. It said 'no problem, I'll go to sleep.'",
    "Why did the scarecrow win an award? He was outstanding in his field.",
    "Why did the math book look sad? Because it had too many problems.",
];

const GREETINGS: &[&str] = &[
    "Hi there!",
    "Hello! Ready when you are.",
    "Hey! How can I help?",
];

const APOLOGY: &str = "Sorry, I couldn't compute that. Try a simpler expression.";

const HELP: &str = "Sorry, I didn't understand that. You can say 'tell me a joke', \
                    'calculate 3 plus 4', 'search for cats', or 'repeat after me hello'.";

/// Leading phrases that route into the expression evaluator
const CALC_PREFIXES: &[&str] = &["calculate ", "what is ", "what's "];

/// Leading phrases that route into web search, longest first
const SEARCH_PREFIXES: &[&str] = &["search for", "look up", "search"];

const GREETING_PREFIXES: &[&str] = &["hello", "hi", "hey buddy", "hey"];

const FAREWELL_KEYWORDS: &[&str] = &["goodbye", "exit", "quit", "stop"];

/// What the caller should do in response to one heard command
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Outcome {
    /// Say this text
    Reply(String),
    /// Say this text, then end the session
    Exit(String),
    /// Report the current time (clock access is the caller's)
    Time,
    /// Report the current date
    Date,
    /// Open or display this search URL
    OpenUrl { query: String, url: String },
}

/// Command router with explicit conversation state
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    last_generated: Option<String>,
    greeting_cursor: usize,
    joke_cursor: usize,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last text the assistant produced that is worth copying
    pub fn last_generated(&self) -> Option<&str> {
        self.last_generated.as_deref()
    }

    /// Route one heard command to an outcome.
    ///
    /// Routing priority follows the original assistant: greeting, farewell,
    /// time, date, search, joke, repeat, copy, calculate, small talk,
    /// fallback help. Time and date match whole words only, so
    /// "what is 3 times 4" reaches the evaluator instead of the clock.
    pub fn dispatch(&mut self, heard: &str) -> Outcome {
        let raw = heard.trim();
        let text = raw.to_lowercase();
        let text = text.as_str();

        if GREETING_PREFIXES.iter().any(|w| text.starts_with(w)) {
            let reply = GREETINGS[self.greeting_cursor % GREETINGS.len()];
            self.greeting_cursor += 1;
            return Outcome::Reply(reply.to_string());
        }

        if FAREWELL_KEYWORDS.iter().any(|k| text.contains(k)) {
            return Outcome::Exit("Goodbye! Shutting down.".to_string());
        }

        if contains_word(text, "time") {
            return Outcome::Time;
        }
        if contains_word(text, "date") {
            return Outcome::Date;
        }

        if let Some(query) = strip_search_prefix(text) {
            let query = query.trim();
            if query.is_empty() {
                return Outcome::Reply("What should I search for?".to_string());
            }
            let url = format!(
                "https://www.google.com/search?q={}",
                urlencoding::encode(query)
            );
            self.last_generated = Some(format!("Search: {} -> {}", query, url));
            return Outcome::OpenUrl {
                query: query.to_string(),
                url,
            };
        }

        if text.contains("joke") {
            let joke = JOKES[self.joke_cursor % JOKES.len()];
            self.joke_cursor += 1;
            self.last_generated = Some("joke".to_string());
            return Outcome::Reply(joke.to_string());
        }

        // Repeats keep the original casing of the heard text.
        if let Some(rest) = strip_prefix_ci(raw, "repeat after me") {
            if rest.is_empty() || rest.starts_with(' ') {
                let phrase = rest.trim();
                if phrase.is_empty() {
                    return Outcome::Reply("Say what should I repeat?".to_string());
                }
                self.last_generated = Some(phrase.to_string());
                return Outcome::Reply(phrase.to_string());
            }
        }

        if text.contains("copy that") || text.contains("copy this") {
            return match &self.last_generated {
                Some(remembered) => Outcome::Reply(format!("Copied: {}", remembered)),
                None => Outcome::Reply("Nothing to copy yet.".to_string()),
            };
        }

        if let Some(expr) = strip_any_prefix(text, CALC_PREFIXES) {
            return match compute_expression(expr.trim()) {
                Ok(value) => {
                    self.last_generated = Some(value.clone());
                    Outcome::Reply(format!("The answer is {}", value))
                }
                Err(_) => Outcome::Reply(APOLOGY.to_string()),
            };
        }

        if text.len() < 60 && text.contains("how are you") {
            return Outcome::Reply(
                "I'm a program, but thanks for asking. Ready to help.".to_string(),
            );
        }

        Outcome::Reply(HELP.to_string())
    }
}

// ── Text helpers ──────────────────────────────────────────

/// Strip the first matching prefix, if any
fn strip_any_prefix<'a>(text: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|p| text.strip_prefix(p))
}

/// Match a search prefix on a word boundary, so "search" alone yields an
/// empty query (and a prompt) while "searching" is not a search command.
fn strip_search_prefix(text: &str) -> Option<&str> {
    for prefix in SEARCH_PREFIXES {
        if let Some(rest) = text.strip_prefix(prefix) {
            if rest.is_empty() || rest.starts_with(' ') {
                return Some(rest);
            }
        }
    }
    None
}

/// ASCII-case-insensitive prefix strip that preserves the tail's casing
fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

/// Whole-word containment: "times" must not match "time"
fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .any(|w| w == word)
}
