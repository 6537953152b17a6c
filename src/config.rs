//! Configuration for a training run.
//!
//! Every section has a `Default` that reproduces the reference setup
//! (regex word tokenizer, `min_df = 2`, RBF SVM with `C = 1`, 80/20 split with
//! seed 42). A [`PipelineConfig`] can also be read from a JSON file; missing
//! sections and fields fall back to their defaults.
//!
//! # Examples
//!
//! ```
//! use partisan::config::PipelineConfig;
//! use partisan::ml::classifier::svm::Kernel;
//!
//! let mut config = PipelineConfig::default();
//! assert_eq!(config.features.min_df, 2);
//! assert_eq!(config.svm.kernel, Kernel::Rbf);
//!
//! config.svm = config.svm.with_kernel(Kernel::Linear);
//! assert!(config.validate().is_ok());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::TokenizerKind;
use crate::error::{PartisanError, Result};
use crate::ml::classifier::svm::{Gamma, Kernel};

/// Text normalizer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Tokenizer used after the char filters have run.
    pub tokenizer: TokenizerKind,
}

impl NormalizerConfig {
    pub fn with_tokenizer(mut self, tokenizer: TokenizerKind) -> Self {
        self.tokenizer = tokenizer;
        self
    }
}

/// TF-IDF settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Minimum number of training documents a term must occur in.
    pub min_df: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self { min_df: 2 }
    }
}

impl FeatureConfig {
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }
}

/// Support vector classifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvmConfig {
    /// Kernel function.
    pub kernel: Kernel,
    /// Regularization parameter; larger values penalize margin violations more.
    pub c: f64,
    /// Kernel coefficient for `poly`, `rbf` and `sigmoid`.
    pub gamma: Gamma,
    /// Degree of the polynomial kernel.
    pub degree: u32,
    /// Independent term of the `poly` and `sigmoid` kernels.
    pub coef0: f64,
    /// Stopping tolerance on the KKT violation.
    pub tol: f64,
    /// Upper bound on solver iterations.
    pub max_iter: usize,
    /// Number of kernel rows kept in the solver cache.
    pub cache_rows: usize,
}

impl Default for SvmConfig {
    fn default() -> Self {
        Self {
            kernel: Kernel::Rbf,
            c: 1.0,
            gamma: Gamma::Scale,
            degree: 3,
            coef0: 0.0,
            tol: 1e-3,
            max_iter: 1_000_000,
            cache_rows: 1024,
        }
    }
}

impl SvmConfig {
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn with_gamma(mut self, gamma: Gamma) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_degree(mut self, degree: u32) -> Self {
        self.degree = degree;
        self
    }

    pub fn with_coef0(mut self, coef0: f64) -> Self {
        self.coef0 = coef0;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_cache_rows(mut self, cache_rows: usize) -> Self {
        self.cache_rows = cache_rows;
        self
    }
}

/// Train/validation split settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of rows held out for validation.
    pub validation_ratio: f64,
    /// Seed of the row shuffle.
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            validation_ratio: 0.2,
            seed: 42,
        }
    }
}

/// Settings for a whole training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub normalizer: NormalizerConfig,
    pub features: FeatureConfig,
    pub svm: SvmConfig,
    pub split: SplitConfig,
}

impl PipelineConfig {
    /// Read a configuration from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.features.min_df == 0 {
            return Err(PartisanError::invalid_config("min_df must be at least 1"));
        }
        if !(self.svm.c > 0.0) {
            return Err(PartisanError::invalid_config(format!(
                "C must be positive, got {}",
                self.svm.c
            )));
        }
        if !(self.svm.tol > 0.0) {
            return Err(PartisanError::invalid_config(format!(
                "tol must be positive, got {}",
                self.svm.tol
            )));
        }
        if let Gamma::Value(gamma) = self.svm.gamma {
            if !(gamma > 0.0) {
                return Err(PartisanError::invalid_config(format!(
                    "gamma must be positive, got {gamma}"
                )));
            }
        }
        if self.svm.cache_rows == 0 {
            return Err(PartisanError::invalid_config("cache_rows must be at least 1"));
        }
        let ratio = self.split.validation_ratio;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(PartisanError::invalid_config(format!(
                "validation_ratio must be in (0, 1), got {ratio}"
            )));
        }
        Ok(())
    }
}
