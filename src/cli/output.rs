//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PartisanArgs};
use crate::error::Result;
use crate::ml::classifier::Label;
use crate::ml::pipeline::ExperimentReport;

/// Result structure for normalizing one post.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResult {
    pub tokens: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<usize>,
}

/// Result structure for labelling a file.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub rows: usize,
    pub labels: Vec<Label>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &PartisanArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output an experiment report.
pub fn output_report(report: &ExperimentReport, args: &PartisanArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", format_report(report));
            Ok(())
        }
        OutputFormat::Json => output_json(report, args),
    }
}

/// Output predicted labels, one per row in human mode.
pub fn output_labels(labels: &[Label], args: &PartisanArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            for label in labels {
                println!("{label}");
            }
            Ok(())
        }
        OutputFormat::Json => output_json(
            &PredictionResult {
                rows: labels.len(),
                labels: labels.to_vec(),
            },
            args,
        ),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &PartisanArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in &obj {
                println!("{key}: {}", format_value(val));
            }
        }
        other => println!("{}", format_value(&other)),
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PartisanArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Render a report as aligned lines.
fn format_report(report: &ExperimentReport) -> String {
    let verdict = if report.beats_baseline() {
        "svm beats baseline"
    } else {
        "svm does not beat baseline"
    };
    format!(
        "Experiment Report:\n\
         ══════════════════\n\
         Training rows:       {}\n\
         Validation rows:     {}\n\
         Vocabulary size:     {}\n\
         Kernel:              {}\n\
         Support vectors:     {}\n\
         SVM accuracy:        {:.4}\n\
         Baseline accuracy:   {:.4}\n\
         Result:              {}\n",
        report.train_rows,
        report.validation_rows,
        report.vocabulary_size,
        report.kernel,
        report.n_support,
        report.svm_accuracy,
        report.baseline_accuracy,
        verdict
    )
}

/// Format a JSON value for human output.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::classifier::svm::Kernel;

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(&serde_json::Value::String("test".to_string())),
            "test"
        );
        assert_eq!(
            format_value(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_value(&serde_json::json!(["vote", "tax"])), "[vote, tax]");
        assert_eq!(format_value(&serde_json::Value::Null), "null");
    }

    #[test]
    fn test_format_report() {
        let report = ExperimentReport {
            train_rows: 80,
            validation_rows: 20,
            vocabulary_size: 312,
            n_support: 41,
            kernel: Kernel::Linear,
            svm_accuracy: 0.85,
            baseline_accuracy: 0.55,
        };
        let text = format_report(&report);

        assert!(text.contains("Kernel:              linear\n"));
        assert!(text.contains("SVM accuracy:        0.8500\n"));
        assert!(text.contains("svm beats baseline"));
    }

    #[test]
    fn test_normalize_result_json() {
        let result = NormalizeResult {
            tokens: vec!["voter".to_string()],
            skipped: None,
        };
        assert_eq!(serde_json::to_string(&result).unwrap(), r#"{"tokens":["voter"]}"#);
    }
}
