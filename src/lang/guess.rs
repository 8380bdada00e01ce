// src/lang/guess.rs
// =============================================================================
// Content-based language guessing.
//
// The detector only falls back to this when the file name says nothing
// useful. The default guesser works in two passes:
// 1. syntect's Sublime Text syntax definitions look at the first line
//    (shebangs, mode lines, `<?php`, XML prologs)
// 2. If that says nothing, the whole body is scored against keyword rules
//    (see keywords.rs)
// =============================================================================

use std::sync::LazyLock;

use syntect::parsing::SyntaxSet;
use thiserror::Error;

use super::keywords;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// What a guesser thinks a piece of content is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guess {
    /// Nothing recognisable, plain text.
    PlainText,
    /// A recognised language. `aliases` are short names in preference order;
    /// `name` is the human-readable display name.
    Lexer { aliases: Vec<String>, name: String },
}

impl Guess {
    /// The name to look up: the first alias, else the lower-cased display name.
    pub fn primary_name(&self) -> Option<String> {
        match self {
            Guess::PlainText => None,
            Guess::Lexer { aliases, name } => Some(
                aliases
                    .first()
                    .cloned()
                    .unwrap_or_else(|| name.to_lowercase()),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("language guess failed: {0}")]
pub struct GuessError(pub String);

/// Anything that can classify raw text by language.
pub trait ContentGuesser: Send + Sync {
    fn guess(&self, content: &str) -> Result<Guess, GuessError>;
}

/// First-line detection using syntect's bundled syntaxes, then keyword
/// scoring over the whole body.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntectGuesser;

impl ContentGuesser for SyntectGuesser {
    fn guess(&self, content: &str) -> Result<Guess, GuessError> {
        let Some(first_line) = content.lines().next() else {
            return Ok(Guess::PlainText);
        };

        if let Some(syntax) = SYNTAX_SET.find_syntax_by_first_line(first_line) {
            if syntax.name != "Plain Text" {
                return Ok(Guess::Lexer {
                    aliases: Vec::new(),
                    name: syntax.name.clone(),
                });
            }
        }

        Ok(match keywords::best_match(content) {
            Some(name) => Guess::Lexer {
                aliases: vec![name.to_string()],
                name: name.to_string(),
            },
            None => Guess::PlainText,
        })
    }
}
