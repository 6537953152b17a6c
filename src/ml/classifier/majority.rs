//! Majority-label baseline.

use std::collections::BTreeMap;

use crate::error::{PartisanError, Result};
use crate::ml::classifier::{Classifier, Label};
use crate::ml::features::FeatureMatrix;

/// Predicts the most frequent training label for every input row.
///
/// Ties go to the lowest label.
#[derive(Debug, Clone, Default)]
pub struct MajorityLabelClassifier {
    mode: Option<Label>,
}

impl MajorityLabelClassifier {
    /// Create an unfitted classifier.
    pub fn new() -> Self {
        Self { mode: None }
    }

    /// Learn the most frequent label. Features are only checked for shape.
    pub fn fit(mut self, features: &FeatureMatrix, labels: &[Label]) -> Result<Self> {
        if features.n_rows() != labels.len() {
            return Err(PartisanError::field(format!(
                "{} feature rows but {} labels",
                features.n_rows(),
                labels.len()
            )));
        }

        let mut counts: BTreeMap<Label, usize> = BTreeMap::new();
        for &label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }

        // BTreeMap iterates in ascending label order, so the first maximum wins.
        let mode = counts
            .iter()
            .fold(None, |best: Option<(Label, usize)>, (&label, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((label, count)),
            })
            .map(|(label, _)| label)
            .ok_or_else(|| PartisanError::invalid_argument("cannot fit on an empty label set"))?;

        self.mode = Some(mode);
        Ok(self)
    }

    /// The learned label, if fitted.
    pub fn mode(&self) -> Option<Label> {
        self.mode
    }

    pub fn is_fitted(&self) -> bool {
        self.mode.is_some()
    }
}

impl Classifier for MajorityLabelClassifier {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>> {
        let mode = self.mode.ok_or_else(|| {
            PartisanError::invalid_state("majority classifier must be fitted before predict")
        })?;
        Ok(vec![mode; features.n_rows()])
    }

    fn name(&self) -> &str {
        "majority"
    }
}
