//! Command implementations for the Partisan CLI.

use std::path::Path;

use crate::analysis::normalizer::TextNormalizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::PipelineConfig;
use crate::dataset::{CsvDatasetReader, Dataset};
use crate::error::Result;
use crate::ml::pipeline::{run_experiment, train_pipeline};

/// Execute a CLI command.
pub fn execute_command(args: PartisanArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Normalize(normalize_args) => normalize_text(normalize_args, config, &args),
        Command::Evaluate(evaluate_args) => evaluate(evaluate_args, config, &args),
        Command::Predict(predict_args) => predict(predict_args, config, &args),
    }
}

/// Read `--config` if given, otherwise use the defaults.
pub fn load_config(args: &PartisanArgs) -> Result<PipelineConfig> {
    match &args.config {
        Some(path) => {
            log::info!("loading configuration from {}", path.display());
            PipelineConfig::from_json_file(path)
        }
        None => Ok(PipelineConfig::default()),
    }
}

/// Override the configured kernel by name.
fn apply_kernel(config: &mut PipelineConfig, kernel: Option<&str>) -> Result<()> {
    if let Some(name) = kernel {
        config.svm.kernel = name.parse()?;
    }
    Ok(())
}

fn read_dataset(path: &Path) -> Result<Dataset> {
    CsvDatasetReader::new().read_path(path)
}

/// Print the lemma sequence of one post.
fn normalize_text(
    args: &NormalizeArgs,
    mut config: PipelineConfig,
    cli_args: &PartisanArgs,
) -> Result<()> {
    if let Some(tokenizer) = args.tokenizer {
        config.normalizer.tokenizer = tokenizer.into();
    }

    let normalizer = TextNormalizer::from_config(&config.normalizer)?;
    let detailed = normalizer.normalize_detailed(&args.text)?;
    let skipped = (cli_args.verbose > 0).then(|| detailed.skipped_count());

    output_result(
        "Normalized text",
        &NormalizeResult {
            tokens: detailed.into_lemmas(),
            skipped,
        },
        cli_args,
    )
}

/// Split a labelled file, train and report validation accuracy.
fn evaluate(args: &EvaluateArgs, mut config: PipelineConfig, cli_args: &PartisanArgs) -> Result<()> {
    apply_kernel(&mut config, args.kernel.as_deref())?;
    if let Some(ratio) = args.validation_ratio {
        config.split.validation_ratio = ratio;
    }
    if let Some(seed) = args.seed {
        config.split.seed = seed;
    }

    let dataset = read_dataset(&args.train_csv)?;
    let report = run_experiment(&config, &dataset)?;
    output_report(&report, cli_args)
}

/// Train on a labelled file and label every row of an unlabeled one.
fn predict(args: &PredictArgs, mut config: PipelineConfig, cli_args: &PartisanArgs) -> Result<()> {
    apply_kernel(&mut config, args.kernel.as_deref())?;

    let train = read_dataset(&args.train_csv)?;
    let unlabeled = read_dataset(&args.unlabeled_csv)?;

    let pipeline = train_pipeline(&config, &train)?;
    let labels = pipeline.classify_texts(&unlabeled)?;
    output_labels(&labels, cli_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PartisanError;
    use crate::ml::classifier::svm::Kernel;
    use clap::Parser;

    #[test]
    fn test_apply_kernel() {
        let mut config = PipelineConfig::default();
        apply_kernel(&mut config, Some("sigmoid")).unwrap();
        assert_eq!(config.svm.kernel, Kernel::Sigmoid);

        apply_kernel(&mut config, None).unwrap();
        assert_eq!(config.svm.kernel, Kernel::Sigmoid);

        assert!(matches!(
            apply_kernel(&mut config, Some("gaussian")),
            Err(PartisanError::UnsupportedKernel(_))
        ));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        std::fs::write(&path, r#"{"svm": {"kernel": "poly", "degree": 2}}"#).unwrap();

        let args = PartisanArgs::try_parse_from([
            "partisan",
            "--config",
            path.to_str().unwrap(),
            "normalize",
            "x",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.svm.kernel, Kernel::Poly);
        assert_eq!(config.svm.degree, 2);
        assert_eq!(config.features.min_df, 2);
    }

    #[test]
    fn test_missing_csv() {
        let args = PartisanArgs::try_parse_from([
            "partisan",
            "-q",
            "evaluate",
            "/nonexistent/partisan/train.csv",
        ])
        .unwrap();
        assert!(matches!(execute_command(args), Err(PartisanError::Io(_))));
    }
}
