//! Interactive confirmation prompts.

use std::io::{self, BufRead, Write};

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Returns `true` when the user accepts.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Reads a `y/N` answer from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Confirm for StdinPrompt {
    fn confirm(&mut self, question: &str) -> bool {
        print!("{question} [s/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        is_yes(&answer)
    }
}

/// Accepts every prompt (`--yes`).
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }
}

/// Accepts `s`/`sim` and `y`/`yes`, case-insensitively.
fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}
