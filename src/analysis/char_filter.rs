//! Char filter implementations for text normalization.
//!
//! Char filters rewrite the raw text before it reaches the tokenizer. The
//! post analyzer chains several of them: URL removal, lowercasing, possessive
//! and apostrophe stripping, hyphen splitting and punctuation blanking.
//!
//! # Available Filters
//!
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`lowercase::LowercaseCharFilter`] - Unicode-aware lowercasing
//!
//! # Examples
//!
//! ```
//! use partisan::analysis::char_filter::CharFilter;
//! use partisan::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::new(r"https?://\S+", "").unwrap();
//! assert_eq!(filter.filter("see https://t.co/x now"), "see  now");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the rewritten text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;

pub use lowercase::LowercaseCharFilter;
pub use pattern_replace::PatternReplaceCharFilter;
