//! Lowercase char filter implementation.
//!
//! Lowercasing happens on the whole text before tokenization so that the
//! possessive and apostrophe rules that follow only have to match lowercase
//! input.

use super::CharFilter;

/// A char filter that converts the whole text to lowercase.
///
/// ASCII-only input takes the fast path; anything else goes through
/// Unicode-aware lowercasing.
///
/// # Examples
///
/// ```
/// use partisan::analysis::char_filter::CharFilter;
/// use partisan::analysis::char_filter::lowercase::LowercaseCharFilter;
///
/// let filter = LowercaseCharFilter::new();
/// assert_eq!(filter.filter("GREAT Day"), "great day");
/// ```
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_ascii() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("Hello WORLD"), "hello world");
    }

    #[test]
    fn test_lowercase_unicode() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("ÉCOLE Straße"), "école straße");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseCharFilter::new().name(), "lowercase");
    }
}
