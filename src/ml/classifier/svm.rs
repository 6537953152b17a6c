//! Kernel support vector classifier.
//!
//! Labels map to signs as `1 -> +1` and `0 -> -1`. The decision value of a
//! row `x` is `sum_i a_i y_i K(x_i, x) - rho` over the support vectors, and
//! the predicted label is 1 exactly when it is positive.
//!
//! # Examples
//!
//! ```
//! use partisan::config::SvmConfig;
//! use partisan::ml::classifier::svm::{Kernel, SvmClassifier};
//! use partisan::ml::classifier::Classifier;
//! use partisan::ml::features::FeatureMatrix;
//!
//! let features = FeatureMatrix::from_rows(
//!     2,
//!     vec![vec![(0, 4.0)], vec![(0, 6.0)], vec![(1, 4.0)], vec![(1, 6.0)]],
//! )
//! .unwrap();
//! let labels = [1, 1, 0, 0];
//!
//! let config = SvmConfig::default().with_kernel(Kernel::Linear);
//! let svm = SvmClassifier::fit(&features, &labels, &config).unwrap();
//! assert_eq!(svm.predict(&features).unwrap(), vec![1, 1, 0, 0]);
//! ```

use crate::config::SvmConfig;
use crate::error::{PartisanError, Result};
use crate::ml::classifier::{Classifier, Label};
use crate::ml::features::FeatureMatrix;

mod cache;
pub mod kernel;
mod smo;

pub use kernel::{Gamma, Kernel};

use kernel::{KernelFunction, SparseRow};
use smo::SmoSolver;

/// A fitted C-SVC.
#[derive(Debug, Clone)]
pub struct SvmClassifier {
    kernel: KernelFunction,
    support_vectors: Vec<SparseRow>,
    /// `a_i * y_i` per support vector.
    dual_coef: Vec<f64>,
    rho: f64,
    n_features: usize,
    iterations: usize,
    converged: bool,
}

impl SvmClassifier {
    /// Train on `features` and row-aligned `labels`.
    pub fn fit(features: &FeatureMatrix, labels: &[Label], config: &SvmConfig) -> Result<Self> {
        if features.n_rows() != labels.len() {
            return Err(PartisanError::field(format!(
                "{} feature rows but {} labels",
                features.n_rows(),
                labels.len()
            )));
        }
        if labels.is_empty() {
            return Err(PartisanError::solver("cannot train on zero rows"));
        }
        if let Some(bad) = labels.iter().find(|&&label| label > 1) {
            return Err(PartisanError::invalid_argument(format!(
                "labels must be 0 or 1, found {bad}"
            )));
        }
        let positives = labels.iter().filter(|&&label| label == 1).count();
        if positives == 0 || positives == labels.len() {
            return Err(PartisanError::solver(format!(
                "training data has a single class ({})",
                labels[0]
            )));
        }
        if !(config.c > 0.0) {
            return Err(PartisanError::invalid_argument(format!(
                "C must be positive, got {}",
                config.c
            )));
        }

        let kernel = KernelFunction {
            kernel: config.kernel,
            gamma: config.gamma.resolve(features),
            degree: config.degree,
            coef0: config.coef0,
        };
        let rows = SparseRow::from_matrix(features);
        let y: Vec<f64> = labels
            .iter()
            .map(|&label| if label == 1 { 1.0 } else { -1.0 })
            .collect();

        log::debug!(
            "training {} SVM on {} rows x {} features (C = {}, gamma = {:.6})",
            kernel.kernel,
            rows.len(),
            features.n_cols(),
            config.c,
            kernel.gamma
        );

        let solution = SmoSolver::new(
            &rows,
            &y,
            kernel,
            config.c,
            config.tol,
            config.max_iter,
            config.cache_rows,
        )
        .solve();

        let mut support_vectors = Vec::new();
        let mut dual_coef = Vec::new();
        for ((row, alpha), y) in rows.into_iter().zip(&solution.alpha).zip(&y) {
            if *alpha > 0.0 {
                support_vectors.push(row);
                dual_coef.push(alpha * y);
            }
        }

        log::info!(
            "trained {} SVM: {} support vectors, {} iterations, dual objective {:.6}",
            kernel.kernel,
            support_vectors.len(),
            solution.iterations,
            solution.objective
        );

        Ok(SvmClassifier {
            kernel,
            support_vectors,
            dual_coef,
            rho: solution.rho,
            n_features: features.n_cols(),
            iterations: solution.iterations,
            converged: solution.converged,
        })
    }

    /// Signed distance-like score per row; positive means label 1.
    pub fn decision_function(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        if features.n_cols() != self.n_features {
            return Err(PartisanError::field(format!(
                "expected {} feature columns, got {}",
                self.n_features,
                features.n_cols()
            )));
        }

        Ok(SparseRow::from_matrix(features)
            .iter()
            .map(|x| {
                self.support_vectors
                    .iter()
                    .zip(&self.dual_coef)
                    .map(|(sv, coef)| coef * self.kernel.compute(sv, x))
                    .sum::<f64>()
                    - self.rho
            })
            .collect())
    }

    /// Number of support vectors.
    pub fn n_support(&self) -> usize {
        self.support_vectors.len()
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel.kernel
    }

    /// The resolved kernel coefficient.
    pub fn gamma(&self) -> f64 {
        self.kernel.gamma
    }

    /// Constant term of the decision function (`-rho`).
    pub fn intercept(&self) -> f64 {
        -self.rho
    }

    /// Solver iterations used during training.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the solver met its tolerance before the iteration cap.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl Classifier for SvmClassifier {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>> {
        Ok(self
            .decision_function(features)?
            .into_iter()
            .map(|value| if value > 0.0 { 1 } else { 0 })
            .collect())
    }

    fn name(&self) -> &str {
        "svm"
    }
}

/// Train an SVM with default settings and the kernel named `kernel`.
///
/// Unknown names fail with [`PartisanError::UnsupportedKernel`].
pub fn train_kernel_classifier(
    features: &FeatureMatrix,
    labels: &[Label],
    kernel: &str,
) -> Result<SvmClassifier> {
    let config = SvmConfig::default().with_kernel(kernel.parse()?);
    SvmClassifier::fit(features, labels, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two well separated groups, one per axis.
    fn toy() -> (FeatureMatrix, Vec<Label>) {
        let features = FeatureMatrix::from_rows(
            2,
            vec![
                vec![(0, 4.0)],
                vec![(0, 6.0)],
                vec![(0, 4.0), (1, 2.0)],
                vec![(1, 4.0)],
                vec![(1, 6.0)],
                vec![(0, 2.0), (1, 4.0)],
            ],
        )
        .unwrap();
        (features, vec![1, 1, 1, 0, 0, 0])
    }

    #[test]
    fn test_linear_separates_training_data() {
        let (features, labels) = toy();
        let svm = train_kernel_classifier(&features, &labels, "linear").unwrap();

        assert!(svm.converged());
        assert_eq!(svm.kernel(), Kernel::Linear);
        assert_eq!(svm.predict(&features).unwrap(), labels);
        assert!(svm.n_support() >= 2 && svm.n_support() <= labels.len());
    }

    #[test]
    fn test_linear_margin() {
        // hard-margin solution is w = (0.5, -0.5), b = 0
        let (features, labels) = toy();
        let svm = train_kernel_classifier(&features, &labels, "linear").unwrap();
        let scores = svm.decision_function(&features).unwrap();

        assert!((scores[2] - 1.0).abs() < 1e-2);
        assert!((scores[5] + 1.0).abs() < 1e-2);
        assert!(svm.intercept().abs() < 1e-2);
    }

    #[test]
    fn test_rbf_separates_training_data() {
        let (features, labels) = toy();
        let svm = train_kernel_classifier(&features, &labels, "rbf").unwrap();
        assert!(svm.gamma() > 0.0);
        assert_eq!(svm.predict(&features).unwrap(), labels);
    }

    #[test]
    fn test_unseen_points() {
        let (features, labels) = toy();
        let svm = train_kernel_classifier(&features, &labels, "linear").unwrap();
        let unseen = FeatureMatrix::from_rows(2, vec![vec![(0, 10.0)], vec![(1, 10.0)], vec![]])
            .unwrap();
        let predictions = svm.predict(&unseen).unwrap();
        assert_eq!(&predictions[..2], &[1, 0]);
    }

    #[test]
    fn test_unsupported_kernel() {
        let (features, labels) = toy();
        assert!(matches!(
            train_kernel_classifier(&features, &labels, "cubic"),
            Err(PartisanError::UnsupportedKernel(_))
        ));
    }

    #[test]
    fn test_training_errors() {
        let (features, _) = toy();
        let config = SvmConfig::default();

        assert!(matches!(
            SvmClassifier::fit(&features, &[1, 1, 1, 1, 1, 1], &config),
            Err(PartisanError::Solver(_))
        ));
        assert!(matches!(
            SvmClassifier::fit(&FeatureMatrix::empty(0, 2), &[], &config),
            Err(PartisanError::Solver(_))
        ));
        assert!(matches!(
            SvmClassifier::fit(&features, &[1, 0], &config),
            Err(PartisanError::Field(_))
        ));
        assert!(matches!(
            SvmClassifier::fit(&features, &[2, 0, 0, 0, 0, 0], &config),
            Err(PartisanError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_width_mismatch() {
        let (features, labels) = toy();
        let svm = train_kernel_classifier(&features, &labels, "linear").unwrap();
        assert!(matches!(
            svm.decision_function(&FeatureMatrix::empty(1, 3)),
            Err(PartisanError::Field(_))
        ));
    }

    #[test]
    fn test_other_kernels_train() {
        let (features, labels) = toy();
        for kernel in ["poly", "sigmoid"] {
            let svm = train_kernel_classifier(&features, &labels, kernel).unwrap();
            assert_eq!(svm.predict(&features).unwrap().len(), labels.len());
        }
    }
}
