//! Analyzer implementations that combine char filters, tokenizers and filters.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Token Stream
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`] - Custom char filter + tokenizer + filter chains
//! - [`PostAnalyzer`] - The fixed cleanup pipeline for social-media posts

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod pipeline;
pub mod post;

pub use pipeline::PipelineAnalyzer;
pub use post::PostAnalyzer;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so a single analyzer can be shared by
/// reference between a training run and every later inference call.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
