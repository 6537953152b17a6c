//! Training and inference workflows.
//!
//! [`train_pipeline`] fits everything needed to label new posts and returns
//! it as a [`TrainedPipeline`]. [`run_experiment`] holds out part of a
//! labelled dataset, trains on the rest and reports the validation accuracy
//! of the SVM next to the majority baseline.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::TextNormalizer;
use crate::analysis::token_filter::ENGLISH_STOP_WORDS;
use crate::config::PipelineConfig;
use crate::dataset::{CorpusProcessor, Dataset, TEXT_FIELD};
use crate::error::{PartisanError, Result};
use crate::ml::classifier::svm::Kernel;
use crate::ml::classifier::{Classifier, Label, MajorityLabelClassifier, SvmClassifier};
use crate::ml::evaluation::evaluate_classifier;
use crate::ml::features::{FeatureMatrix, FittedTfIdf, create_features, transform_features};
use crate::ml::labels::create_labels;

/// Normalizer, fitted vectorizer and fitted classifier.
///
/// All three are read-only after training, so a pipeline can be cloned and
/// shared across threads freely.
#[derive(Clone)]
pub struct TrainedPipeline {
    normalizer: Arc<TextNormalizer>,
    vectorizer: Arc<FittedTfIdf>,
    classifier: Arc<dyn Classifier>,
}

impl TrainedPipeline {
    pub fn new(
        normalizer: Arc<TextNormalizer>,
        vectorizer: Arc<FittedTfIdf>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        TrainedPipeline {
            normalizer,
            vectorizer,
            classifier,
        }
    }

    pub fn normalizer(&self) -> &Arc<TextNormalizer> {
        &self.normalizer
    }

    pub fn vectorizer(&self) -> &Arc<FittedTfIdf> {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }

    /// Label every row of an unlabeled dataset of raw posts.
    pub fn classify_texts(&self, dataset: &Dataset) -> Result<Vec<Label>> {
        classify_texts(
            &self.normalizer,
            &self.vectorizer,
            self.classifier.as_ref(),
            dataset,
        )
    }

    /// Label a single raw post.
    pub fn predict_text(&self, text: &str) -> Result<Label> {
        let tokens = self.normalizer.normalize(text)?;
        let features = self.vectorizer.transform(&[tokens])?;
        let labels = self.classifier.predict(&features)?;
        labels.first().copied().ok_or_else(|| {
            PartisanError::invalid_state(format!(
                "classifier '{}' returned no label for a single post",
                self.classifier.name()
            ))
        })
    }
}

impl Debug for TrainedPipeline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainedPipeline")
            .field("normalizer", &self.normalizer)
            .field("n_features", &self.vectorizer.n_features())
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

/// Label every row of `dataset` from its raw `text` column.
///
/// Each post is normalized on its own, then the batch is transformed with the
/// fitted vectorizer and predicted. Labels are aligned with the rows.
pub fn classify_texts(
    normalizer: &TextNormalizer,
    vectorizer: &FittedTfIdf,
    classifier: &dyn Classifier,
    dataset: &Dataset,
) -> Result<Vec<Label>> {
    let documents = dataset
        .texts(TEXT_FIELD)?
        .into_iter()
        .map(|text| normalizer.normalize(text))
        .collect::<Result<Vec<_>>>()?;
    let features = vectorizer.transform(&documents)?;
    classifier.predict(&features)
}

/// Vectorizer, training matrix and labels of one training set.
struct TrainingSet {
    vectorizer: FittedTfIdf,
    features: FeatureMatrix,
    labels: Vec<Label>,
}

impl TrainingSet {
    fn build(
        config: &PipelineConfig,
        normalizer: &Arc<TextNormalizer>,
        dataset: &Dataset,
    ) -> Result<Self> {
        let labels = create_labels(dataset)?;
        let processed = CorpusProcessor::new(Arc::clone(normalizer)).process(dataset)?;
        let stop_words = normalizer.normalize_stop_words(ENGLISH_STOP_WORDS.iter().copied())?;
        let (vectorizer, features) = create_features(&processed, &stop_words, &config.features)?;

        log::info!(
            "training set: {} rows, {} features, {} labelled 1",
            features.n_rows(),
            features.n_cols(),
            labels.iter().filter(|&&label| label == 1).count()
        );

        Ok(TrainingSet {
            vectorizer,
            features,
            labels,
        })
    }
}

/// Train the SVM pipeline on every row of a labelled dataset.
///
/// The dataset needs a `text` column of raw posts and a `screen_name`
/// column for the labels.
pub fn train_pipeline(config: &PipelineConfig, dataset: &Dataset) -> Result<TrainedPipeline> {
    config.validate()?;
    let normalizer = Arc::new(TextNormalizer::from_config(&config.normalizer)?);
    let training = TrainingSet::build(config, &normalizer, dataset)?;
    let svm = SvmClassifier::fit(&training.features, &training.labels, &config.svm)?;

    Ok(TrainedPipeline::new(
        normalizer,
        Arc::new(training.vectorizer),
        Arc::new(svm),
    ))
}

/// Outcome of one train/validate run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub train_rows: usize,
    pub validation_rows: usize,
    pub vocabulary_size: usize,
    pub n_support: usize,
    pub kernel: Kernel,
    pub svm_accuracy: f64,
    pub baseline_accuracy: f64,
}

impl ExperimentReport {
    /// Whether the SVM scored strictly higher than the baseline.
    pub fn beats_baseline(&self) -> bool {
        self.svm_accuracy > self.baseline_accuracy
    }
}

/// Split `dataset`, train the SVM and the baseline, and score both.
pub fn run_experiment(config: &PipelineConfig, dataset: &Dataset) -> Result<ExperimentReport> {
    config.validate()?;
    let (train, validation) = dataset.split(config.split.validation_ratio, config.split.seed)?;
    log::info!(
        "split {} rows into {} training and {} validation rows",
        dataset.len(),
        train.len(),
        validation.len()
    );

    let normalizer = Arc::new(TextNormalizer::from_config(&config.normalizer)?);
    let training = TrainingSet::build(config, &normalizer, &train)?;

    let svm = SvmClassifier::fit(&training.features, &training.labels, &config.svm)?;
    let baseline = MajorityLabelClassifier::new().fit(&training.features, &training.labels)?;

    let validation_labels = create_labels(&validation)?;
    let processed = CorpusProcessor::new(Arc::clone(&normalizer)).process(&validation)?;
    let validation_features = transform_features(&training.vectorizer, &processed)?;

    let svm_accuracy = evaluate_classifier(&svm, &validation_features, &validation_labels)?;
    let baseline_accuracy =
        evaluate_classifier(&baseline, &validation_features, &validation_labels)?;

    log::info!(
        "validation accuracy: svm ({}) {:.4}, baseline {:.4}",
        svm.kernel(),
        svm_accuracy,
        baseline_accuracy
    );

    Ok(ExperimentReport {
        train_rows: train.len(),
        validation_rows: validation.len(),
        vocabulary_size: training.vectorizer.n_features(),
        n_support: svm.n_support(),
        kernel: svm.kernel(),
        svm_accuracy,
        baseline_accuracy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Row, SCREEN_NAME_FIELD};

    const GOP_POSTS: [&str; 5] = [
        "Secure the border and build the wall!",
        "SECURE the border, build the WALL https://t.co/abc",
        "secure the border and build the wall...",
        "Secure the Border & build the Wall",
        "#Secure the border and build the wall",
    ];

    const OTHER_POSTS: [&str; 5] = [
        "Climate science matters for our health",
        "CLIMATE science matters for our health!!",
        "climate-science matters for our health http://x.co/1",
        "Climate science matters for our HEALTH.",
        "@climate science matters for our health",
    ];

    fn labelled() -> Dataset {
        let rows = GOP_POSTS
            .iter()
            .map(|text| ("GOP", *text))
            .chain(OTHER_POSTS.iter().map(|text| ("SenSanders", *text)))
            .map(|(name, text)| {
                Row::builder()
                    .add_text(SCREEN_NAME_FIELD, name)
                    .add_text(TEXT_FIELD, text)
                    .build()
            })
            .collect();
        Dataset::from_rows(rows)
    }

    fn linear_config() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.svm = config.svm.with_kernel(Kernel::Linear);
        config
    }

    #[test]
    fn test_train_and_classify() {
        let pipeline = train_pipeline(&linear_config(), &labelled()).unwrap();
        assert_eq!(pipeline.classifier().name(), "svm");
        assert!(pipeline.vectorizer().column_of("border").is_some());
        assert!(pipeline.vectorizer().column_of("the").is_none());

        let unlabeled = Dataset::from_texts([
            "Build the wall now",
            "Health and climate",
            "nothing in common",
        ]);
        let labels = pipeline.classify_texts(&unlabeled).unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(&labels[..2], &[0, 1]);

        assert_eq!(pipeline.predict_text("Secure the border").unwrap(), 0);
        assert_eq!(pipeline.predict_text("Climate science").unwrap(), 1);
    }

    #[test]
    fn test_predict_text_rejects_empty_prediction() {
        struct Silent;

        impl Classifier for Silent {
            fn predict(&self, _features: &FeatureMatrix) -> Result<Vec<Label>> {
                Ok(Vec::new())
            }

            fn name(&self) -> &str {
                "silent"
            }
        }

        let trained = train_pipeline(&linear_config(), &labelled()).unwrap();
        let pipeline = TrainedPipeline::new(
            Arc::clone(trained.normalizer()),
            Arc::clone(trained.vectorizer()),
            Arc::new(Silent),
        );

        assert!(matches!(
            pipeline.predict_text("build the wall"),
            Err(PartisanError::InvalidState(_))
        ));
    }

    #[test]
    fn test_classify_requires_text_column() {
        let pipeline = train_pipeline(&linear_config(), &labelled()).unwrap();
        let no_text = Dataset::from_rows(vec![Row::builder().add_text("body", "wall").build()]);
        assert!(matches!(
            pipeline.classify_texts(&no_text),
            Err(PartisanError::Field(_))
        ));
    }

    #[test]
    fn test_experiment_beats_baseline() {
        let report = run_experiment(&linear_config(), &labelled()).unwrap();

        assert_eq!(report.train_rows, 8);
        assert_eq!(report.validation_rows, 2);
        assert_eq!(report.kernel, Kernel::Linear);
        assert_eq!(report.svm_accuracy, 1.0);
        assert!(report.beats_baseline());
    }

    #[test]
    fn test_single_class_training_fails() {
        let dataset = Dataset::from_rows(
            GOP_POSTS
                .iter()
                .map(|text| {
                    Row::builder()
                        .add_text(SCREEN_NAME_FIELD, "GOP")
                        .add_text(TEXT_FIELD, *text)
                        .build()
                })
                .collect(),
        );
        assert!(matches!(
            train_pipeline(&linear_config(), &dataset),
            Err(PartisanError::Solver(_))
        ));
    }
}
