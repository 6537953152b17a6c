//! Feature construction from processed datasets.

use std::collections::BTreeSet;

use crate::config::FeatureConfig;
use crate::dataset::{Dataset, TEXT_FIELD};
use crate::error::Result;

pub mod matrix;
pub mod tfidf;

pub use matrix::FeatureMatrix;
pub use tfidf::{FittedTfIdf, TfIdfVectorizer};

/// Fit a TF-IDF vectorizer on the token column of a processed dataset.
///
/// `stop_words` must already be normalized the same way as the tokens.
/// Returns the fitted vectorizer and the training feature matrix.
pub fn create_features(
    processed: &Dataset,
    stop_words: &BTreeSet<String>,
    config: &FeatureConfig,
) -> Result<(FittedTfIdf, FeatureMatrix)> {
    let documents = processed.token_lists(TEXT_FIELD)?;
    TfIdfVectorizer::from_config(config)
        .with_stop_words(stop_words.iter().cloned())
        .fit_transform(&documents)
}

/// Transform the token column of a processed dataset with a fitted vectorizer.
pub fn transform_features(vectorizer: &FittedTfIdf, processed: &Dataset) -> Result<FeatureMatrix> {
    let documents = processed.token_lists(TEXT_FIELD)?;
    vectorizer.transform(&documents)
}
