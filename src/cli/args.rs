//! Command line argument parsing for the Partisan CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::TokenizerKind;

/// Partisan - classify short posts by author group
#[derive(Parser, Debug, Clone)]
#[command(name = "partisan")]
#[command(about = "Classify short social-media posts by author group")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PartisanArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PartisanArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the lemma sequence of one post
    Normalize(NormalizeArgs),

    /// Train on part of a labelled CSV file and report validation accuracy
    Evaluate(EvaluateArgs),

    /// Train on a labelled CSV file and label every row of another one
    Predict(PredictArgs),
}

/// Arguments for normalizing a post
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Raw post text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Tokenizer to segment the cleaned text with
    #[arg(long, value_enum)]
    pub tokenizer: Option<TokenizerArg>,
}

/// Arguments for a train/validate run
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Labelled CSV file with `text` and `screen_name` columns
    #[arg(value_name = "TRAIN_CSV")]
    pub train_csv: PathBuf,

    /// SVM kernel (linear, poly, rbf, sigmoid)
    #[arg(short, long)]
    pub kernel: Option<String>,

    /// Fraction of rows held out for validation
    #[arg(long)]
    pub validation_ratio: Option<f64>,

    /// Seed of the train/validation shuffle
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for labelling new posts
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Labelled CSV file with `text` and `screen_name` columns
    #[arg(value_name = "TRAIN_CSV")]
    pub train_csv: PathBuf,

    /// CSV file with a `text` column to label
    #[arg(value_name = "UNLABELED_CSV")]
    pub unlabeled_csv: PathBuf,

    /// SVM kernel (linear, poly, rbf, sigmoid)
    #[arg(short, long)]
    pub kernel: Option<String>,
}

/// Tokenizers selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerArg {
    /// Whitespace-delimited runs
    Regex,
    /// Unicode word boundaries
    UnicodeWord,
}

impl From<TokenizerArg> for TokenizerKind {
    fn from(arg: TokenizerArg) -> Self {
        match arg {
            TokenizerArg::Regex => TokenizerKind::Regex,
            TokenizerArg::UnicodeWord => TokenizerKind::UnicodeWord,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
