//! Lemmatization: reducing inflected words to their dictionary form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod morphy;

pub use morphy::MorphyLemmatizer;

/// Coarse grammatical category that selects the lemmatization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LemmaPos {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl LemmaPos {
    /// Map a Penn-Treebank-style tag to a category by its first letter.
    ///
    /// `N` maps to noun, `V` to verb, `J` to adjective and `R` to adverb.
    /// The letter is matched case-insensitively. Every other tag, including
    /// the empty one, falls back to noun.
    pub fn from_tag(tag: &str) -> Self {
        match tag.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => LemmaPos::Verb,
            Some('J') => LemmaPos::Adjective,
            Some('R') => LemmaPos::Adverb,
            _ => LemmaPos::Noun,
        }
    }

    /// Single-letter code of the category.
    pub fn code(&self) -> char {
        match self {
            LemmaPos::Noun => 'n',
            LemmaPos::Verb => 'v',
            LemmaPos::Adjective => 'a',
            LemmaPos::Adverb => 'r',
        }
    }
}

impl fmt::Display for LemmaPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Trait for lemmatizers.
///
/// A lemmatizer may reject a word with an error. Callers that process whole
/// sentences are expected to skip the word and keep going.
pub trait Lemmatizer: Send + Sync {
    /// Lemmatize `word` in the given category.
    fn lemmatize(&self, word: &str, pos: LemmaPos) -> Result<String>;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}
