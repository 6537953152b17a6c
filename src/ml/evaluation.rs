//! Accuracy scoring.

use crate::error::{PartisanError, Result};
use crate::ml::classifier::{Classifier, Label};
use crate::ml::features::FeatureMatrix;

/// Fraction of `predictions` equal to `truth` at the same position.
pub fn accuracy(truth: &[Label], predictions: &[Label]) -> Result<f64> {
    if truth.len() != predictions.len() {
        return Err(PartisanError::field(format!(
            "{} true labels but {} predictions",
            truth.len(),
            predictions.len()
        )));
    }
    if truth.is_empty() {
        return Err(PartisanError::invalid_argument(
            "cannot compute accuracy of zero predictions",
        ));
    }

    let correct = truth
        .iter()
        .zip(predictions)
        .filter(|(expected, predicted)| expected == predicted)
        .count();
    Ok(correct as f64 / truth.len() as f64)
}

/// Predict `features` with `classifier` and score against `labels`.
pub fn evaluate_classifier(
    classifier: &dyn Classifier,
    features: &FeatureMatrix,
    labels: &[Label],
) -> Result<f64> {
    let predictions = classifier.predict(features)?;
    let score = accuracy(labels, &predictions)?;
    log::debug!(
        "{} classifier: accuracy {:.4} on {} rows",
        classifier.name(),
        score,
        labels.len()
    );
    Ok(score)
}
