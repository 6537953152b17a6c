//! Machine learning for Partisan.
//!
//! This module turns processed datasets into TF-IDF features and binary
//! labels, trains classifiers on them and scores the results. The
//! [`pipeline`] module ties these steps together with the text normalizer.

pub mod classifier;
pub mod evaluation;
pub mod features;
pub mod labels;
pub mod pipeline;

pub use classifier::{Classifier, Label, MajorityLabelClassifier, SvmClassifier};
pub use evaluation::{accuracy, evaluate_classifier};
pub use features::{FeatureMatrix, FittedTfIdf, TfIdfVectorizer, create_features, transform_features};
pub use labels::{IN_GROUP_SCREEN_NAMES, create_labels};
pub use pipeline::{ExperimentReport, TrainedPipeline, classify_texts, run_experiment, train_pipeline};
