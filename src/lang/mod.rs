// src/lang/mod.rs
// =============================================================================
// This module picks the language tag for a fenced code block.
//
// Rules, first decisive one wins:
// 1. A forced tag from the caller is used as-is
// 2. The file extension, looked up in a fixed table
// 3. A guess from the content itself, normalised through a second table
// 4. "text"
//
// Guessing from content must never fail the render, so errors and panics from
// the guesser both end up as "text".
// =============================================================================

mod guess;
mod keywords;
mod table;

use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

pub use guess::{ContentGuesser, Guess, GuessError, SyntectGuesser};
pub use table::{from_filename, from_guess_name, FALLBACK};

/// Log target for language detection.
pub const LANGUAGE_TARGET: &str = "language";

pub struct LanguageDetector {
    guesser: Box<dyn ContentGuesser>,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector {
    pub fn new() -> Self {
        Self::with_guesser(SyntectGuesser)
    }

    pub fn with_guesser(guesser: impl ContentGuesser + 'static) -> Self {
        Self {
            guesser: Box::new(guesser),
        }
    }

    pub fn detect(&self, content: &str, filename: Option<&str>, forced: Option<&str>) -> String {
        if let Some(tag) = forced {
            return tag.to_string();
        }

        if let Some(tag) = filename.and_then(from_filename) {
            debug!(target: LANGUAGE_TARGET, filename, tag, "language from extension");
            return tag.to_string();
        }

        self.from_content(content).to_string()
    }

    /// Guess from content only; always returns a tag from the closed set.
    pub fn from_content(&self, content: &str) -> &'static str {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.guesser.guess(content)));

        let guess = match outcome {
            Ok(Ok(guess)) => guess,
            Ok(Err(err)) => {
                debug!(target: LANGUAGE_TARGET, error = %err, "content guess failed");
                return FALLBACK;
            }
            Err(_) => {
                debug!(target: LANGUAGE_TARGET, "content guesser panicked");
                return FALLBACK;
            }
        };

        let tag = guess
            .primary_name()
            .and_then(|name| from_guess_name(&name))
            .unwrap_or(FALLBACK);

        debug!(target: LANGUAGE_TARGET, ?guess, tag, "language from content");
        tag
    }
}
