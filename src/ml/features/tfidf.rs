//! TF-IDF vectorizer over pre-tokenized documents.
//!
//! Documents arrive already normalized, so no tokenization or lowercasing
//! happens here. Weights follow the usual smoothed definition:
//!
//! - term frequency is the raw count of the term in the document,
//! - `idf(t) = ln((1 + n) / (1 + df(t))) + 1` where `n` is the number of
//!   training documents,
//! - each row is scaled to unit Euclidean length (all-zero rows stay zero).
//!
//! Fitting consumes a [`TfIdfVectorizer`] and yields a [`FittedTfIdf`], the
//! only type with a `transform` method.

use std::collections::{BTreeMap, BTreeSet};

use ahash::{AHashMap, AHashSet};

use crate::config::FeatureConfig;
use crate::error::{PartisanError, Result};
use crate::ml::features::matrix::FeatureMatrix;

/// Unfitted TF-IDF settings.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    /// Minimum number of documents a term must occur in.
    min_df: usize,
    /// Terms never admitted to the vocabulary.
    stop_words: BTreeSet<String>,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfVectorizer {
    /// Create a vectorizer with `min_df = 2` and no stop words.
    pub fn new() -> Self {
        Self {
            min_df: 2,
            stop_words: BTreeSet::new(),
        }
    }

    /// Create a vectorizer from configuration.
    pub fn from_config(config: &FeatureConfig) -> Self {
        Self::new().with_min_df(config.min_df)
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// Set the stop words. They must already be normalized like the documents.
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Learn the vocabulary and idf weights, then transform the same documents.
    pub fn fit_transform<D: AsRef<[String]>>(
        self,
        documents: &[D],
    ) -> Result<(FittedTfIdf, FeatureMatrix)> {
        let fitted = self.fit(documents)?;
        let matrix = fitted.transform(documents)?;
        Ok((fitted, matrix))
    }

    /// Learn the vocabulary and idf weights.
    pub fn fit<D: AsRef<[String]>>(self, documents: &[D]) -> Result<FittedTfIdf> {
        if documents.is_empty() {
            return Err(PartisanError::invalid_argument(
                "cannot fit TF-IDF on an empty corpus",
            ));
        }
        if self.min_df == 0 {
            return Err(PartisanError::invalid_argument("min_df must be at least 1"));
        }

        let n_documents = documents.len();
        let mut document_frequency: AHashMap<&str, usize> = AHashMap::new();

        for doc in documents {
            let unique: AHashSet<&str> = doc
                .as_ref()
                .iter()
                .map(String::as_str)
                .filter(|term| !self.stop_words.contains(*term))
                .collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let kept: BTreeMap<&str, usize> = document_frequency
            .into_iter()
            .filter(|&(_, df)| df >= self.min_df)
            .collect();

        if kept.is_empty() {
            return Err(PartisanError::invalid_argument(format!(
                "empty vocabulary: no term occurs in at least {} of {} documents",
                self.min_df, n_documents
            )));
        }

        let mut terms = Vec::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (term, df) in kept {
            terms.push(term.to_string());
            // idf = ln((1 + n) / (1 + df)) + 1
            idf.push(((1.0 + n_documents as f64) / (1.0 + df as f64)).ln() + 1.0);
        }

        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        log::debug!(
            "fitted TF-IDF on {} documents: {} terms kept (min_df = {})",
            n_documents,
            terms.len(),
            self.min_df
        );

        Ok(FittedTfIdf {
            vocabulary,
            terms,
            idf,
            stop_words: self.stop_words,
            n_documents,
        })
    }
}

/// A TF-IDF transformer with a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct FittedTfIdf {
    /// Term -> column index mapping.
    vocabulary: AHashMap<String, usize>,
    /// Terms in column order (lexicographic).
    terms: Vec<String>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
    /// Stop words used during fitting.
    stop_words: BTreeSet<String>,
    /// Number of documents seen during fitting.
    n_documents: usize,
}

impl FittedTfIdf {
    /// Map documents into the fitted feature space.
    ///
    /// Terms outside the vocabulary are ignored.
    pub fn transform<D: AsRef<[String]>>(&self, documents: &[D]) -> Result<FeatureMatrix> {
        let rows = documents
            .iter()
            .map(|doc| self.transform_one(doc.as_ref()))
            .collect();
        FeatureMatrix::from_rows(self.n_features(), rows)
    }

    /// Weights of a single document as `(column, weight)` pairs in column order.
    pub fn transform_one(&self, tokens: &[String]) -> Vec<(usize, f64)> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&col) = self.vocabulary.get(token.as_str()) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut row: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.idf[col]))
            .collect();

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in row.iter_mut() {
                *w /= norm;
            }
        }
        row
    }

    /// Terms in column order.
    pub fn vocabulary(&self) -> &[String] {
        &self.terms
    }

    /// Inverse document frequency per column.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Width of the feature space.
    pub fn n_features(&self) -> usize {
        self.terms.len()
    }

    /// Column of `term`, if it is in the vocabulary.
    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Stop words excluded at fit time.
    pub fn stop_words(&self) -> &BTreeSet<String> {
        &self.stop_words
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&str]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|d| d.split_whitespace().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_vocabulary_min_df_and_order() {
        let corpus = docs(&["banana apple", "apple cherry", "banana apple apple"]);
        let (fitted, matrix) = TfIdfVectorizer::new().fit_transform(&corpus).unwrap();

        assert_eq!(fitted.vocabulary(), &["apple".to_string(), "banana".to_string()]);
        assert_eq!(fitted.column_of("cherry"), None);
        assert_eq!(matrix.n_rows(), 3);
        assert_eq!(matrix.n_cols(), 2);
        assert_eq!(fitted.n_documents(), 3);
    }

    #[test]
    fn test_weights() {
        let corpus = docs(&["banana apple", "apple cherry", "banana apple apple"]);
        let (fitted, matrix) = TfIdfVectorizer::new().fit_transform(&corpus).unwrap();

        let idf_banana = (4.0f64 / 3.0).ln() + 1.0;
        assert!((fitted.idf()[0] - 1.0).abs() < 1e-12);
        assert!((fitted.idf()[1] - idf_banana).abs() < 1e-12);

        // second row only has "apple" in the vocabulary
        assert_eq!(matrix.row_entries(1), vec![(0, 1.0)]);

        let norm = (4.0 + idf_banana * idf_banana).sqrt();
        let row = matrix.to_dense_row(2);
        assert!((row[0] - 2.0 / norm).abs() < 1e-12);
        assert!((row[1] - idf_banana / norm).abs() < 1e-12);

        for i in 0..matrix.n_rows() {
            assert!((matrix.row_norm(i) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_transform_is_idempotent() {
        let corpus = docs(&["a b c", "a b", "b c d", "d a"]);
        let (fitted, matrix) = TfIdfVectorizer::new().fit_transform(&corpus).unwrap();
        assert_eq!(fitted.transform(&corpus).unwrap(), matrix);
        assert_eq!(fitted.transform(&corpus).unwrap(), matrix);
    }

    #[test]
    fn test_unknown_terms_and_empty_documents() {
        let corpus = docs(&["tax cut", "tax plan", "cut plan"]);
        let (fitted, _) = TfIdfVectorizer::new().fit_transform(&corpus).unwrap();

        let matrix = fitted.transform(&docs(&["wall wall", ""])).unwrap();
        assert_eq!(matrix.n_cols(), 3);
        assert_eq!(matrix.nnz(), 0);
    }

    #[test]
    fn test_stop_words_excluded() {
        let corpus = docs(&["the tax", "the tax", "the plan", "plan"]);
        let (fitted, _) = TfIdfVectorizer::new()
            .with_stop_words(["the"])
            .fit_transform(&corpus)
            .unwrap();
        assert_eq!(fitted.vocabulary(), &["plan".to_string(), "tax".to_string()]);
        assert!(fitted.stop_words().contains("the"));
    }

    #[test]
    fn test_fit_errors() {
        let empty: Vec<Vec<String>> = Vec::new();
        assert!(matches!(
            TfIdfVectorizer::new().fit(&empty),
            Err(PartisanError::InvalidArgument(_))
        ));

        let singletons = docs(&["a", "b", "c"]);
        assert!(matches!(
            TfIdfVectorizer::new().fit(&singletons),
            Err(PartisanError::InvalidArgument(_))
        ));

        let corpus = docs(&["a", "a"]);
        assert!(TfIdfVectorizer::new().with_min_df(0).fit(&corpus).is_err());
    }

    #[test]
    fn test_min_df_one_keeps_everything() {
        let corpus = docs(&["a", "b", "c"]);
        let fitted = TfIdfVectorizer::from_config(&FeatureConfig::default().with_min_df(1))
            .fit(&corpus)
            .unwrap();
        assert_eq!(fitted.n_features(), 3);
    }
}
