//! Kernel functions and their parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PartisanError, Result};
use crate::ml::features::FeatureMatrix;

/// Kernel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    /// `x · y`
    Linear,
    /// `(gamma * x · y + coef0) ^ degree`
    Poly,
    /// `exp(-gamma * |x - y|^2)`
    Rbf,
    /// `tanh(gamma * x · y + coef0)`
    Sigmoid,
}

impl Kernel {
    /// Every kernel, in name order used by help output.
    pub const ALL: [Kernel; 4] = [Kernel::Linear, Kernel::Poly, Kernel::Rbf, Kernel::Sigmoid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kernel::Linear => "linear",
            Kernel::Poly => "poly",
            Kernel::Rbf => "rbf",
            Kernel::Sigmoid => "sigmoid",
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kernel {
    type Err = PartisanError;

    fn from_str(s: &str) -> Result<Self> {
        Kernel::ALL
            .into_iter()
            .find(|kernel| kernel.as_str() == s)
            .ok_or_else(|| PartisanError::unsupported_kernel(s))
    }
}

/// Kernel coefficient for `poly`, `rbf` and `sigmoid`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gamma {
    /// `1 / (n_features * Var(X))`, or 1 when the variance is zero.
    Scale,
    /// `1 / n_features`
    Auto,
    /// A fixed value.
    Value(f64),
}

impl Gamma {
    /// Resolve to a number for the given training matrix.
    ///
    /// The variance is taken over every cell of the matrix, zeros included.
    pub fn resolve(&self, features: &FeatureMatrix) -> f64 {
        let n_features = features.n_cols().max(1) as f64;
        match *self {
            Gamma::Value(gamma) => gamma,
            Gamma::Auto => 1.0 / n_features,
            Gamma::Scale => {
                let cells = (features.n_rows() * features.n_cols()) as f64;
                if cells == 0.0 {
                    return 1.0;
                }
                let data = features.as_csmat().data();
                let sum: f64 = data.iter().sum();
                let sum_sq: f64 = data.iter().map(|v| v * v).sum();
                let mean = sum / cells;
                let variance = sum_sq / cells - mean * mean;
                if variance > 0.0 {
                    1.0 / (n_features * variance)
                } else {
                    1.0
                }
            }
        }
    }
}

/// A sparse vector with its squared norm precomputed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SparseRow {
    indices: Vec<usize>,
    values: Vec<f64>,
    norm_sq: f64,
}

impl SparseRow {
    pub(crate) fn new(entries: Vec<(usize, f64)>) -> Self {
        let (indices, values): (Vec<usize>, Vec<f64>) = entries.into_iter().unzip();
        let norm_sq = values.iter().map(|v| v * v).sum();
        SparseRow {
            indices,
            values,
            norm_sq,
        }
    }

    /// All rows of a feature matrix.
    pub(crate) fn from_matrix(features: &FeatureMatrix) -> Vec<SparseRow> {
        (0..features.n_rows())
            .map(|i| SparseRow::new(features.row_entries(i)))
            .collect()
    }

    /// Dot product by merging the sorted index lists.
    pub(crate) fn dot(&self, other: &SparseRow) -> f64 {
        let (mut a, mut b) = (0, 0);
        let mut sum = 0.0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }
}

/// A kernel with its parameters resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct KernelFunction {
    pub(crate) kernel: Kernel,
    pub(crate) gamma: f64,
    pub(crate) degree: u32,
    pub(crate) coef0: f64,
}

impl KernelFunction {
    pub(crate) fn compute(&self, x: &SparseRow, y: &SparseRow) -> f64 {
        match self.kernel {
            Kernel::Linear => x.dot(y),
            Kernel::Poly => (self.gamma * x.dot(y) + self.coef0).powi(self.degree as i32),
            Kernel::Rbf => {
                let distance_sq = (x.norm_sq + y.norm_sq - 2.0 * x.dot(y)).max(0.0);
                (-self.gamma * distance_sq).exp()
            }
            Kernel::Sigmoid => (self.gamma * x.dot(y) + self.coef0).tanh(),
        }
    }
}
