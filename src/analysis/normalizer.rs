//! Text normalization: raw post in, lemma sequence out.
//!
//! [`TextNormalizer`] is the context object that owns the analyzer, the
//! part-of-speech tagger and the lemmatizer. Build it once per run and share
//! it; every call is read-only.
//!
//! # Examples
//!
//! ```
//! use partisan::analysis::normalizer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::english().unwrap();
//! let lemmas = normalizer.normalize("Voters were running to the polls!").unwrap();
//! assert_eq!(lemmas, vec!["voter", "be", "run", "to", "the", "poll"]);
//! ```

use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PostAnalyzer};
use crate::analysis::lemmatizer::{LemmaPos, Lemmatizer, MorphyLemmatizer};
use crate::analysis::tagger::{PosTagger, RuleBasedTagger};
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer, TokenizerKind, UnicodeWordTokenizer};
use crate::config::NormalizerConfig;
use crate::error::{PartisanError, Result};

/// What happened to a single token during lemmatization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LemmaOutcome {
    Lemmatized {
        surface: String,
        tag: String,
        lemma: String,
    },
    Skipped {
        surface: String,
        tag: String,
        reason: String,
    },
}

impl LemmaOutcome {
    /// The token as produced by the analyzer.
    pub fn surface(&self) -> &str {
        match self {
            LemmaOutcome::Lemmatized { surface, .. } | LemmaOutcome::Skipped { surface, .. } => {
                surface
            }
        }
    }

    /// Whether the lemmatizer rejected this token.
    pub fn is_skipped(&self) -> bool {
        matches!(self, LemmaOutcome::Skipped { .. })
    }
}

/// The result of normalizing one document, with per-token outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    /// Lemmas of the tokens that were lemmatized, in input order.
    pub lemmas: Vec<String>,
    /// One outcome per token that reached the tagger.
    pub outcomes: Vec<LemmaOutcome>,
}

impl NormalizedText {
    /// Number of tokens dropped because lemmatization failed.
    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    /// Number of tokens that produced a lemma.
    pub fn lemmatized_count(&self) -> usize {
        self.lemmas.len()
    }

    /// Consume and return only the lemmas.
    pub fn into_lemmas(self) -> Vec<String> {
        self.lemmas
    }
}

/// Turns raw posts into lemma sequences.
#[derive(Clone)]
pub struct TextNormalizer {
    analyzer: Arc<dyn Analyzer>,
    tagger: Arc<dyn PosTagger>,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl TextNormalizer {
    /// Assemble a normalizer from its three collaborators.
    pub fn new(
        analyzer: Arc<dyn Analyzer>,
        tagger: Arc<dyn PosTagger>,
        lemmatizer: Arc<dyn Lemmatizer>,
    ) -> Self {
        TextNormalizer {
            analyzer,
            tagger,
            lemmatizer,
        }
    }

    /// Post analyzer, rule-based tagger and morphy lemmatizer.
    pub fn english() -> Result<Self> {
        Self::from_config(&NormalizerConfig::default())
    }

    /// Build the English normalizer with the tokenizer chosen in `config`.
    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        let tokenizer: Arc<dyn Tokenizer> = match config.tokenizer {
            TokenizerKind::Regex => Arc::new(RegexTokenizer::new()?),
            TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
        };

        Ok(Self::new(
            Arc::new(PostAnalyzer::with_tokenizer(tokenizer)?),
            Arc::new(RuleBasedTagger::new()),
            Arc::new(MorphyLemmatizer::new()),
        ))
    }

    /// Replace the analyzer.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Replace the tagger.
    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    /// Replace the lemmatizer.
    pub fn with_lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    /// Normalize `text` into a lemma sequence.
    ///
    /// Tokens the lemmatizer rejects are dropped; use
    /// [`normalize_detailed`](Self::normalize_detailed) to see them.
    pub fn normalize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.normalize_detailed(text)?.into_lemmas())
    }

    /// Normalize `text` and report the outcome of every token.
    ///
    /// Analyzer and tagger failures are returned as errors. A lemmatizer
    /// failure only affects its own token, which is recorded as skipped.
    pub fn normalize_detailed(&self, text: &str) -> Result<NormalizedText> {
        let words: Vec<String> = self.analyzer.analyze(text)?.map(|t| t.text).collect();
        if words.is_empty() {
            return Ok(NormalizedText::default());
        }

        let tagged = self.tagger.tag(&words)?;
        if tagged.len() != words.len() {
            return Err(PartisanError::analysis(format!(
                "tagger '{}' returned {} tags for {} tokens",
                self.tagger.name(),
                tagged.len(),
                words.len()
            )));
        }

        let mut normalized = NormalizedText {
            lemmas: Vec::with_capacity(tagged.len()),
            outcomes: Vec::with_capacity(tagged.len()),
        };

        for token in tagged {
            let pos = LemmaPos::from_tag(&token.tag);
            match self.lemmatizer.lemmatize(&token.word, pos) {
                Ok(lemma) => {
                    normalized.lemmas.push(lemma.clone());
                    normalized.outcomes.push(LemmaOutcome::Lemmatized {
                        surface: token.word,
                        tag: token.tag,
                        lemma,
                    });
                }
                Err(e) => {
                    log::debug!("dropping token '{}' ({}): {}", token.word, token.tag, e);
                    normalized.outcomes.push(LemmaOutcome::Skipped {
                        surface: token.word,
                        tag: token.tag,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(normalized)
    }

    /// Normalize a stop-word list the same way documents are normalized.
    ///
    /// A single entry may yield zero or several lemmas; all of them are kept.
    pub fn normalize_stop_words<I, S>(&self, words: I) -> Result<BTreeSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = BTreeSet::new();
        for word in words {
            normalized.extend(self.normalize(word.as_ref())?);
        }
        Ok(normalized)
    }

    /// Name of the analyzer in use.
    pub fn analyzer_name(&self) -> &'static str {
        self.analyzer.name()
    }
}

impl Debug for TextNormalizer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("analyzer", &self.analyzer.name())
            .field("tagger", &self.tagger.name())
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}
