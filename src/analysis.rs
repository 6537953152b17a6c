//! Text analysis module for Partisan.
//!
//! This module provides the text processing building blocks (char filters,
//! tokenizers, token filters, analyzers) together with the part-of-speech
//! tagger, the lemmatizer and the [`TextNormalizer`](normalizer::TextNormalizer)
//! that turns one raw post into a sequence of lemmas.

pub mod analyzer;
pub mod char_filter;
pub mod lemmatizer;
pub mod normalizer;
pub mod tagger;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, PipelineAnalyzer, PostAnalyzer};
pub use lemmatizer::{LemmaPos, Lemmatizer, MorphyLemmatizer};
pub use normalizer::{LemmaOutcome, NormalizedText, TextNormalizer};
pub use tagger::{PosTagger, RuleBasedTagger, TaggedToken};
pub use token::{Token, TokenStream};
