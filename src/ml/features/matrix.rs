//! Sparse feature matrix.

use sprs::CsMat;

use crate::error::{PartisanError, Result};

/// Row-major sparse matrix of feature weights.
///
/// Rows are documents and columns are vocabulary terms. The width is fixed
/// once the matrix is built.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    inner: CsMat<f64>,
}

impl FeatureMatrix {
    /// Wrap a CSR matrix.
    pub fn from_csmat(matrix: CsMat<f64>) -> Result<Self> {
        if !matrix.is_csr() {
            return Err(PartisanError::invalid_argument(
                "feature matrices must be stored row-major (CSR)",
            ));
        }
        Ok(FeatureMatrix { inner: matrix })
    }

    /// Build a matrix from per-row `(column, value)` entries.
    ///
    /// Entries inside a row may come in any order but must not repeat a column.
    pub fn from_rows(n_cols: usize, rows: Vec<Vec<(usize, f64)>>) -> Result<Self> {
        let n_rows = rows.len();
        let mut indptr = Vec::with_capacity(n_rows + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);

        for mut row in rows {
            row.sort_unstable_by_key(|&(col, _)| col);
            for (col, value) in row {
                if col >= n_cols {
                    return Err(PartisanError::invalid_argument(format!(
                        "column {col} out of range for width {n_cols}"
                    )));
                }
                indices.push(col);
                data.push(value);
            }
            indptr.push(indices.len());
        }

        let inner = CsMat::try_new((n_rows, n_cols), indptr, indices, data)
            .map_err(|(_, _, _, e)| PartisanError::invalid_argument(e.to_string()))?;
        Ok(FeatureMatrix { inner })
    }

    /// An all-zero matrix of the given shape.
    pub fn empty(n_rows: usize, n_cols: usize) -> Self {
        FeatureMatrix {
            inner: CsMat::zero((n_rows, n_cols)),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.inner.rows()
    }

    pub fn n_cols(&self) -> usize {
        self.inner.cols()
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    /// Stored entries of row `i` in column order; empty if `i` is out of range.
    pub fn row_entries(&self, i: usize) -> Vec<(usize, f64)> {
        self.inner
            .outer_view(i)
            .map(|row| row.iter().map(|(col, &value)| (col, value)).collect())
            .unwrap_or_default()
    }

    /// Row `i` as a dense vector of length [`n_cols`](Self::n_cols).
    pub fn to_dense_row(&self, i: usize) -> Vec<f64> {
        let mut dense = vec![0.0; self.n_cols()];
        for (col, value) in self.row_entries(i) {
            dense[col] = value;
        }
        dense
    }

    /// Euclidean norm of row `i`.
    pub fn row_norm(&self, i: usize) -> f64 {
        self.row_entries(i)
            .iter()
            .map(|(_, v)| v * v)
            .sum::<f64>()
            .sqrt()
    }

    /// Borrow the underlying CSR matrix.
    pub fn as_csmat(&self) -> &CsMat<f64> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let matrix =
            FeatureMatrix::from_rows(3, vec![vec![(2, 1.0), (0, 2.0)], vec![], vec![(1, 3.0)]])
                .unwrap();

        assert_eq!(matrix.n_rows(), 3);
        assert_eq!(matrix.n_cols(), 3);
        assert_eq!(matrix.nnz(), 3);
        assert_eq!(matrix.row_entries(0), vec![(0, 2.0), (2, 1.0)]);
        assert!(matrix.row_entries(1).is_empty());
        assert_eq!(matrix.to_dense_row(2), vec![0.0, 3.0, 0.0]);
        assert!(matrix.row_entries(7).is_empty());
    }

    #[test]
    fn test_from_rows_rejects_out_of_range_column() {
        assert!(FeatureMatrix::from_rows(2, vec![vec![(2, 1.0)]]).is_err());
    }

    #[test]
    fn test_empty() {
        let matrix = FeatureMatrix::empty(5, 4);
        assert_eq!(matrix.n_rows(), 5);
        assert_eq!(matrix.n_cols(), 4);
        assert_eq!(matrix.nnz(), 0);
        assert_eq!(matrix.to_dense_row(4), vec![0.0; 4]);
    }

    #[test]
    fn test_row_norm() {
        let matrix = FeatureMatrix::from_rows(2, vec![vec![(0, 3.0), (1, 4.0)]]).unwrap();
        assert!((matrix.row_norm(0) - 5.0).abs() < 1e-12);
    }
}
