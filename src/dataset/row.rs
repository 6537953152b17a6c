//! A single dataset row.

use ahash::AHashMap;

use crate::dataset::field_value::FieldValue;
use crate::error::{PartisanError, Result};

/// A row is a set of named field values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    fields: AHashMap<String, FieldValue>,
}

impl Row {
    /// Create a new empty row.
    pub fn new() -> Self {
        Row {
            fields: AHashMap::new(),
        }
    }

    /// Create a builder for constructing rows.
    pub fn builder() -> RowBuilder {
        RowBuilder::new()
    }

    /// Set a field, replacing any previous value.
    pub fn set_field<S: Into<String>>(&mut self, name: S, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Get a field value.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Get a field value or fail with a field error.
    pub fn require_field(&self, name: &str) -> Result<&FieldValue> {
        self.fields
            .get(name)
            .ok_or_else(|| PartisanError::field(format!("row has no '{name}' field")))
    }

    /// Get a text field or fail with a field error.
    pub fn require_text(&self, name: &str) -> Result<&str> {
        let value = self.require_field(name)?;
        value.as_text().ok_or_else(|| {
            PartisanError::field(format!(
                "field '{name}' holds {}, expected text",
                value.kind()
            ))
        })
    }

    /// Get a token field or fail with a field error.
    pub fn require_tokens(&self, name: &str) -> Result<&[String]> {
        let value = self.require_field(name)?;
        value.as_tokens().ok_or_else(|| {
            PartisanError::field(format!(
                "field '{name}' holds {}, expected tokens",
                value.kind()
            ))
        })
    }

    /// Get all field names, in no particular order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|s| s.as_str()).collect()
    }

    /// Check if the row has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the row is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A builder for constructing rows in a fluent manner.
#[derive(Debug, Default)]
pub struct RowBuilder {
    row: Row,
}

impl RowBuilder {
    pub fn new() -> Self {
        RowBuilder { row: Row::new() }
    }

    /// Add a text field.
    pub fn add_text<S: Into<String>, T: Into<String>>(mut self, name: S, value: T) -> Self {
        self.row.set_field(name, FieldValue::Text(value.into()));
        self
    }

    /// Add a token sequence field.
    pub fn add_tokens<S: Into<String>>(mut self, name: S, tokens: Vec<String>) -> Self {
        self.row.set_field(name, FieldValue::Tokens(tokens));
        self
    }

    /// Add a field with a generic value.
    pub fn add_field<S: Into<String>>(mut self, name: S, value: FieldValue) -> Self {
        self.row.set_field(name, value);
        self
    }

    /// Build the final row.
    pub fn build(self) -> Row {
        self.row
    }
}
