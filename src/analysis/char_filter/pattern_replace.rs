use regex::{NoExpand, Regex};

use super::CharFilter;
use crate::error::{PartisanError, Result};

/// A char filter that replaces every match of a regex pattern.
///
/// The replacement is inserted literally; `$1`-style group references are
/// not expanded.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| PartisanError::analysis(format!("Invalid regex pattern: {e}")))?,
            replacement: replacement.to_string(),
        })
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, NoExpand(&self.replacement))
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"\d+", "NUM").unwrap();
        assert_eq!(filter.filter("Year 2024"), "Year NUM");
    }

    #[test]
    fn test_remove_pattern() {
        let filter = PatternReplaceCharFilter::new(r"-", "").unwrap();
        assert_eq!(filter.filter("123-456-789"), "123456789");
    }

    #[test]
    fn test_replacement_is_literal() {
        let filter = PatternReplaceCharFilter::new(r"(\w+)", "$1!").unwrap();
        assert_eq!(filter.filter("abc"), "$1!");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PatternReplaceCharFilter::new(r"(unclosed", "");
        assert!(matches!(result, Err(PartisanError::Analysis(_))));
    }
}
