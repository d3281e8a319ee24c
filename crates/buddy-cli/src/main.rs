use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::process;

use buddy_core::{compute_expression, normalize, Dispatcher, Outcome};

const APOLOGY: &str = "Sorry, I couldn't compute that. Try a simpler expression.";

/// VoiceBuddy - text-command assistant front-end
///
/// Normalize, parse, and evaluate spoken arithmetic phrases, or chat with
/// the command dispatcher over stdin.
#[derive(Parser)]
#[command(name = "buddy", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a spoken arithmetic phrase ("what is 3 plus 4")
    Compute {
        /// The phrase to evaluate
        phrase: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the canonical symbolic form of a phrase
    Normalize {
        /// The phrase to normalize
        phrase: String,
    },

    /// Parse a phrase and print its expression tree
    Parse {
        /// The phrase to parse
        phrase: String,
        /// Output the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session with the command dispatcher
    Chat,

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Compute { phrase, json } => cmd_compute(&phrase, json),
        Commands::Normalize { phrase } => cmd_normalize(&phrase),
        Commands::Parse { phrase, json } => cmd_parse(&phrase, json),
        Commands::Chat => cmd_chat(),
        Commands::Version => {
            println!(
                "buddy {} (buddy-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            0
        }
    };

    process::exit(exit_code);
}

/// Strip a recognized leading command phrase, per the evaluator's caller
/// contract. The phrase must already be lower-cased.
fn strip_command_prefix(text: &str) -> &str {
    for prefix in ["calculate ", "what is ", "what's "] {
        if let Some(rest) = text.strip_prefix(prefix) {
            return rest;
        }
    }
    text
}

// ── Commands ──────────────────────────────────────────────

fn cmd_compute(phrase: &str, json: bool) -> i32 {
    let lowered = phrase.trim().to_lowercase();
    let expr = strip_command_prefix(&lowered);

    match compute_expression(expr) {
        Ok(value) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "ok": true, "value": value })
                );
            } else {
                println!("The answer is {}", value.green().bold());
            }
            0
        }
        Err(err) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "ok": false, "error": err.to_string() })
                );
            } else {
                eprintln!("{} {}", "error:".red().bold(), err);
                println!("{}", APOLOGY);
            }
            1
        }
    }
}

fn cmd_normalize(phrase: &str) -> i32 {
    println!("{}", normalize(&phrase.trim().to_lowercase()));
    0
}

fn cmd_parse(phrase: &str, json: bool) -> i32 {
    let lowered = phrase.trim().to_lowercase();
    let canonical = normalize(strip_command_prefix(&lowered));

    match buddy_core::parser::parse(&canonical) {
        Ok(expr) => {
            if json {
                match serde_json::to_string_pretty(&expr) {
                    Ok(rendered) => println!("{}", rendered),
                    Err(err) => {
                        eprintln!("{} {}", "error:".red().bold(), err);
                        return 2;
                    }
                }
            } else {
                println!("{}", expr);
            }
            0
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            1
        }
    }
}

// ── Chat loop ─────────────────────────────────────────────

fn cmd_chat() -> i32 {
    let mut dispatcher = Dispatcher::new();
    let stdin = io::stdin();

    say("VoiceBuddy ready. Say 'goodbye' to leave.");

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("{} {}", "error:".red().bold(), err);
                return 2;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match dispatcher.dispatch(&line) {
            Outcome::Reply(text) => say(&text),
            Outcome::Exit(text) => {
                say(&text);
                return 0;
            }
            Outcome::Time => {
                let now = chrono::Local::now();
                say(&format!("It's {}", now.format("%I:%M %p")));
            }
            Outcome::Date => {
                let now = chrono::Local::now();
                say(&format!("Today is {}", now.format("%A, %B %d, %Y")));
            }
            Outcome::OpenUrl { query, url } => {
                say(&format!("Searching for {}.", query));
                println!("{}", url.underline());
            }
        }
        io::stdout().flush().ok();
    }

    0
}

fn say(text: &str) {
    println!("{} {}", "VoiceBuddy:".cyan().bold(), text);
}
