//! CSV dataset reader.
//!
//! The first row is the header and gives the column names. Every cell is kept
//! as [`FieldValue::Text`]; nothing is type-inferred, so account names such as
//! `"1776"` stay text.
//!
//! ```csv
//! screen_name,text
//! realDonaldTrump,MAKE AMERICA GREAT AGAIN!
//! HillaryClinton,Stronger together.
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ahash::AHashSet;
use csv::{ReaderBuilder, Trim};

use crate::dataset::field_value::FieldValue;
use crate::dataset::row::Row;
use crate::dataset::Dataset;
use crate::error::{PartisanError, Result};

/// Reads a [`Dataset`] from CSV.
#[derive(Debug, Clone)]
pub struct CsvDatasetReader {
    /// CSV delimiter character (default: ',')
    delimiter: u8,
    /// Whether to trim whitespace around cells
    trim: bool,
    /// Whether rows may have a different number of cells than the header
    flexible: bool,
}

impl Default for CsvDatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvDatasetReader {
    /// Create a reader for comma-separated input.
    pub fn new() -> Self {
        CsvDatasetReader {
            delimiter: b',',
            trim: true,
            flexible: false,
        }
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace around cells.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set whether to allow rows with a different cell count.
    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    /// Read a dataset from a file.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            PartisanError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to open {}: {e}", path.display()),
            ))
        })?;
        let dataset = self.read(file)?;
        log::info!("read {} rows from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Read a dataset from an in-memory string.
    pub fn read_str(&self, input: &str) -> Result<Dataset> {
        self.read(input.as_bytes())
    }

    /// Read a dataset from any reader.
    pub fn read<R: Read>(&self, input: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(self.flexible)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(PartisanError::field("CSV header is empty"));
        }
        let mut seen = AHashSet::new();
        if let Some(duplicate) = headers.iter().find(|name| !seen.insert(*name)) {
            return Err(anyhow::anyhow!("Duplicate CSV column '{duplicate}'").into());
        }

        let mut dataset = Dataset::new(headers.iter());
        for record in reader.records() {
            let record = record?;
            let mut row = Row::new();
            for (header, value) in headers.iter().zip(record.iter()) {
                row.set_field(header, FieldValue::Text(value.to_string()));
            }
            dataset.push(row);
        }

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{SCREEN_NAME_FIELD, TEXT_FIELD};

    #[test]
    fn test_read_basic() {
        let csv = "screen_name,text\nGOP,Vote today!\nsomeone,\"Hello, world\"\n";
        let dataset = CsvDatasetReader::new().read_str(csv).unwrap();

        assert_eq!(dataset.columns(), &["screen_name".to_string(), "text".to_string()]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.texts(TEXT_FIELD).unwrap(),
            vec!["Vote today!", "Hello, world"]
        );
        assert_eq!(
            dataset.texts(SCREEN_NAME_FIELD).unwrap(),
            vec!["GOP", "someone"]
        );
    }

    #[test]
    fn test_numbers_stay_text() {
        let csv = "screen_name,text\n1776,2016\n";
        let dataset = CsvDatasetReader::new().read_str(csv).unwrap();
        assert_eq!(dataset.texts(TEXT_FIELD).unwrap(), vec!["2016"]);
    }

    #[test]
    fn test_ragged_rows_rejected_unless_flexible() {
        let csv = "screen_name,text\nGOP\n";
        assert!(matches!(
            CsvDatasetReader::new().read_str(csv),
            Err(PartisanError::Csv(_))
        ));

        let dataset = CsvDatasetReader::new()
            .with_flexible(true)
            .read_str(csv)
            .unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.texts(TEXT_FIELD).is_err());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = CsvDatasetReader::new().read_str("text,text\na,b\n");
        assert!(matches!(result, Err(PartisanError::Anyhow(_))));
    }

    #[test]
    fn test_custom_delimiter() {
        let csv = "screen_name;text\nGOP;hi\n";
        let dataset = CsvDatasetReader::new()
            .with_delimiter(b';')
            .read_str(csv)
            .unwrap();
        assert_eq!(dataset.texts(TEXT_FIELD).unwrap(), vec!["hi"]);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CsvDatasetReader::new().read_path("/nonexistent/tweets.csv"),
            Err(PartisanError::Io(_))
        ));
    }
}
