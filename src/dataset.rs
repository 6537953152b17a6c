//! Tabular datasets of posts.
//!
//! A [`Dataset`] is an ordered list of [`Row`]s plus the column names they
//! were loaded with. Row order is an invariant: features, labels and
//! predictions derived from a dataset are aligned with it by position.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{PartisanError, Result};

pub mod csv;
pub mod field_value;
pub mod processor;
pub mod row;

pub use self::csv::CsvDatasetReader;
pub use field_value::FieldValue;
pub use processor::CorpusProcessor;
pub use row::{Row, RowBuilder};

/// Column holding the post body.
pub const TEXT_FIELD: &str = "text";

/// Column holding the author account.
pub const SCREEN_NAME_FIELD: &str = "screen_name";

/// Ordered collection of rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset with the given columns.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Dataset {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a dataset from rows, collecting column names in first-seen order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            let mut names = row.field_names();
            names.sort_unstable();
            for name in names {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
        }
        Dataset { columns, rows }
    }

    /// Build a single-column dataset of raw texts.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = texts
            .into_iter()
            .map(|text| Row::builder().add_text(TEXT_FIELD, text).build())
            .collect();
        Dataset {
            columns: vec![TEXT_FIELD.to_string()],
            rows,
        }
    }

    /// Append a row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by position.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text values of `field` for every row.
    pub fn texts(&self, field: &str) -> Result<Vec<&str>> {
        self.rows.iter().map(|row| row.require_text(field)).collect()
    }

    /// Token sequences of `field` for every row.
    pub fn token_lists(&self, field: &str) -> Result<Vec<&[String]>> {
        self.rows.iter().map(|row| row.require_tokens(field)).collect()
    }

    /// A new dataset made of the rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Result<Dataset> {
        let rows = indices
            .iter()
            .map(|&i| {
                self.rows.get(i).cloned().ok_or_else(|| {
                    PartisanError::invalid_argument(format!(
                        "row index {i} out of range for {} rows",
                        self.rows.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Dataset {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Shuffle rows with a seeded generator and split off a validation part.
    ///
    /// Returns `(train, validation)`. The validation part has
    /// `ceil(len * validation_ratio)` rows, clamped so that neither part is
    /// empty. The same seed always produces the same split.
    pub fn split(&self, validation_ratio: f64, seed: u64) -> Result<(Dataset, Dataset)> {
        if !(validation_ratio > 0.0 && validation_ratio < 1.0) {
            return Err(PartisanError::invalid_argument(format!(
                "validation ratio must be in (0, 1), got {validation_ratio}"
            )));
        }
        let n = self.rows.len();
        if n < 2 {
            return Err(PartisanError::invalid_argument(format!(
                "cannot split a dataset of {n} rows"
            )));
        }

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let n_validation = ((n as f64 * validation_ratio).ceil() as usize).clamp(1, n - 1);
        let (validation, train) = indices.split_at(n_validation);

        Ok((self.select(train)?, self.select(validation)?))
    }

    /// Replace the rows while keeping the columns.
    pub(crate) fn with_rows(&self, rows: Vec<Row>) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows,
        }
    }
}
