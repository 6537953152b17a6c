use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::{LowercaseCharFilter, PatternReplaceCharFilter};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::RemoveEmptyFilter;
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::Result;

/// `http://` or `https://` followed by a run of non-whitespace.
pub const URL_PATTERN: &str = r"https?://\S+";

/// A possessive `'s` that ends a word.
pub const POSSESSIVE_PATTERN: &str = r"'s\b";

/// Any ASCII punctuation character.
pub const PUNCTUATION_PATTERN: &str = r"[[:punct:]]";

/// Cleanup and tokenization for social-media posts.
///
/// Char filters run in this order, each one seeing the output of the last:
/// URLs removed, text lowercased, word-final `'s` removed, remaining
/// apostrophes removed, hyphens turned into spaces, remaining ASCII
/// punctuation turned into spaces. The tokenizer then splits the text and
/// blank tokens are dropped.
pub struct PostAnalyzer {
    inner: PipelineAnalyzer,
}

impl PostAnalyzer {
    /// Create a post analyzer with the default regex word tokenizer.
    pub fn new() -> Result<Self> {
        Self::with_tokenizer(Arc::new(RegexTokenizer::new()?))
    }

    /// Create a post analyzer that segments with the given tokenizer.
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Result<Self> {
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(URL_PATTERN, "")?))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(
                POSSESSIVE_PATTERN,
                "",
            )?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new("'", "")?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new("-", " ")?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(
                PUNCTUATION_PATTERN,
                " ",
            )?))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("post");

        Ok(Self { inner: analyzer })
    }

    /// Run only the char filters and return the cleaned text.
    pub fn clean(&self, text: &str) -> String {
        self.inner.clean(text)
    }
}

impl Analyzer for PostAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "post"
    }
}

impl Debug for PostAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
