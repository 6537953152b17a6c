//! Tokenizer implementations for text analysis.

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod unicode_word;

pub use self::regex::RegexTokenizer;
pub use unicode_word::UnicodeWordTokenizer;

/// Tokenizer selection used by configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Runs between whitespace and punctuation ([`self::regex::WORD_PATTERN`]).
    #[default]
    Regex,
    /// Unicode word boundaries (UAX #29).
    UnicodeWord,
}
