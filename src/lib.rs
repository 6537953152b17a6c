//! # Partisan
//!
//! Author-group classification for short social-media posts.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Pluggable text analysis pipeline (char filters, tokenizers, token filters)
//! - Part-of-speech aware lemmatization with injectable tagger and lemmatizer
//! - TF-IDF feature extraction over sparse matrices
//! - Kernel SVM classifier (linear, polynomial, RBF, sigmoid) and a majority baseline
//! - Train / evaluate / predict workflow with a small CLI

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ml;

pub mod prelude {
    pub use crate::analysis::normalizer::{LemmaOutcome, NormalizedText, TextNormalizer};
    pub use crate::config::PipelineConfig;
    pub use crate::dataset::{Dataset, FieldValue, Row};
    pub use crate::error::{PartisanError, Result};
    pub use crate::ml::classifier::{Classifier, Label, MajorityLabelClassifier, SvmClassifier};
    pub use crate::ml::features::{FeatureMatrix, FittedTfIdf, TfIdfVectorizer};
    pub use crate::ml::pipeline::{ExperimentReport, TrainedPipeline};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
