//! Corpus processing: normalize the text column of every row.

use std::sync::Arc;

use crate::analysis::normalizer::TextNormalizer;
use crate::dataset::field_value::FieldValue;
use crate::dataset::{Dataset, TEXT_FIELD};
use crate::error::Result;

/// Applies a [`TextNormalizer`] to one column of a dataset.
///
/// The input dataset is left untouched; the returned copy has the column
/// replaced by [`FieldValue::Tokens`] and every other field passed through.
#[derive(Debug, Clone)]
pub struct CorpusProcessor {
    normalizer: Arc<TextNormalizer>,
    field: String,
}

impl CorpusProcessor {
    /// Create a processor for the `text` column.
    pub fn new(normalizer: Arc<TextNormalizer>) -> Self {
        CorpusProcessor {
            normalizer,
            field: TEXT_FIELD.to_string(),
        }
    }

    /// Process a different column.
    pub fn with_field<S: Into<String>>(mut self, field: S) -> Self {
        self.field = field.into();
        self
    }

    /// The normalizer used for every row.
    pub fn normalizer(&self) -> &Arc<TextNormalizer> {
        &self.normalizer
    }

    /// Normalize the column of every row.
    ///
    /// Fails with a field error if any row lacks the column or holds a
    /// non-text value in it.
    pub fn process(&self, dataset: &Dataset) -> Result<Dataset> {
        let mut rows = Vec::with_capacity(dataset.len());
        let mut empty = 0usize;

        for row in dataset.rows() {
            let tokens = self.normalizer.normalize(row.require_text(&self.field)?)?;
            if tokens.is_empty() {
                empty += 1;
            }
            let mut processed = row.clone();
            processed.set_field(self.field.clone(), FieldValue::Tokens(tokens));
            rows.push(processed);
        }

        if empty > 0 {
            log::warn!(
                "{empty} of {} documents are empty after normalization",
                dataset.len()
            );
        }
        log::debug!("normalized {} documents", rows.len());

        Ok(dataset.with_rows(rows))
    }
}

/// Normalize the `text` column of every row of `dataset`.
pub fn process_all(normalizer: Arc<TextNormalizer>, dataset: &Dataset) -> Result<Dataset> {
    CorpusProcessor::new(normalizer).process(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Row, SCREEN_NAME_FIELD};
    use crate::error::PartisanError;

    fn normalizer() -> Arc<TextNormalizer> {
        Arc::new(TextNormalizer::english().unwrap())
    }

    #[test]
    fn test_process_replaces_text_only() {
        let dataset = Dataset::from_rows(vec![
            Row::builder()
                .add_text(TEXT_FIELD, "Cats RULE")
                .add_text(SCREEN_NAME_FIELD, "GOP")
                .build(),
            Row::builder()
                .add_text(TEXT_FIELD, "https://t.co/x")
                .add_text(SCREEN_NAME_FIELD, "other")
                .build(),
        ]);

        let processed = process_all(normalizer(), &dataset).unwrap();

        assert_eq!(processed.len(), 2);
        assert_eq!(processed.columns(), dataset.columns());
        let tokens = processed.token_lists(TEXT_FIELD).unwrap();
        assert_eq!(tokens[0], ["cat", "rule"]);
        assert!(tokens[1].is_empty());
        assert_eq!(
            processed.texts(SCREEN_NAME_FIELD).unwrap(),
            vec!["GOP", "other"]
        );
        // the input is unchanged
        assert_eq!(dataset.texts(TEXT_FIELD).unwrap()[0], "Cats RULE");
    }

    #[test]
    fn test_missing_text_column() {
        let dataset = Dataset::from_rows(vec![Row::builder().add_text("body", "hi").build()]);
        assert!(matches!(
            process_all(normalizer(), &dataset),
            Err(PartisanError::Field(_))
        ));
    }

    #[test]
    fn test_custom_field() {
        let dataset = Dataset::from_rows(vec![Row::builder().add_text("body", "Dogs").build()]);
        let processed = CorpusProcessor::new(normalizer())
            .with_field("body")
            .process(&dataset)
            .unwrap();
        assert_eq!(processed.token_lists("body").unwrap()[0], ["dog"]);
    }
}
