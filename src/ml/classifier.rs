//! Binary classifiers over feature matrices.

use crate::error::Result;
use crate::ml::features::FeatureMatrix;

pub mod majority;
pub mod svm;

pub use majority::MajorityLabelClassifier;
pub use svm::SvmClassifier;

/// Class label. Only 0 and 1 are produced.
pub type Label = u8;

/// A fitted classifier.
///
/// Implementations are read-only after fitting and may be shared across
/// threads.
pub trait Classifier: Send + Sync {
    /// Predict one label per row of `features`.
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
