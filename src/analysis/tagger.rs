//! Part-of-speech tagging.
//!
//! A tagger assigns each token a Penn-Treebank-style tag (`NN`, `VBD`,
//! `JJ`, ...). Only the first letter of the tag matters downstream: it selects
//! the lemmatization mode through [`LemmaPos::from_tag`](crate::analysis::lemmatizer::LemmaPos::from_tag).

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod rule_based;

pub use rule_based::RuleBasedTagger;

/// A word paired with its grammatical category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// The token text as it came out of the tokenizer.
    pub word: String,
    /// Penn-Treebank-style tag.
    pub tag: String,
}

impl TaggedToken {
    /// Create a new tagged token.
    pub fn new<W: Into<String>, T: Into<String>>(word: W, tag: T) -> Self {
        TaggedToken {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

/// Trait for part-of-speech taggers.
///
/// Implementations must return exactly one tagged token per input word, in
/// input order, and must be deterministic.
pub trait PosTagger: Send + Sync {
    /// Tag a whole sentence; context may influence each tag.
    fn tag(&self, words: &[String]) -> Result<Vec<TaggedToken>>;

    /// Get the name of this tagger.
    fn name(&self) -> &'static str;
}
