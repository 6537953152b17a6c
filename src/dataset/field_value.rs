//! Field value types for dataset rows.
//!
//! ```
//! use partisan::dataset::FieldValue;
//!
//! let text = FieldValue::from("hello world");
//! assert_eq!(text.as_text(), Some("hello world"));
//!
//! let tokens = FieldValue::Tokens(vec!["hello".to_string(), "world".to_string()]);
//! assert_eq!(tokens.as_tokens().map(|t| t.len()), Some(2));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of a [`Row`](crate::dataset::Row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Raw text value
    Text(String),
    /// Normalized token sequence
    Tokens(Vec<String>),
}

impl FieldValue {
    /// Get the text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the tokens if this is a token sequence.
    pub fn as_tokens(&self) -> Option<&[String]> {
        match self {
            FieldValue::Tokens(tokens) => Some(tokens),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Tokens(_) => "tokens",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Tokens(tokens) => write!(f, "{}", tokens.join(" ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::Tokens(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_variant() {
        let text = FieldValue::from("1776");
        assert_eq!(text.as_text(), Some("1776"));
        assert_eq!(text.as_tokens(), None);
        assert_eq!(text.kind(), "text");

        let tokens = FieldValue::from(vec!["great".to_string()]);
        assert_eq!(tokens.as_text(), None);
        assert_eq!(tokens.as_tokens(), Some(&["great".to_string()][..]));
    }

    #[test]
    fn test_display() {
        let tokens = FieldValue::from(vec!["make".to_string(), "great".to_string()]);
        assert_eq!(tokens.to_string(), "make great");
        assert_eq!(tokens.kind(), "tokens");
        assert_eq!(FieldValue::from("MAGA!").to_string(), "MAGA!");
    }
}
