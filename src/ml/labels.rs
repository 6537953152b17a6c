//! Binary labels from the author column.

use crate::dataset::{Dataset, SCREEN_NAME_FIELD};
use crate::error::Result;
use crate::ml::classifier::Label;

/// Accounts whose posts get label 0. Everyone else gets label 1.
pub const IN_GROUP_SCREEN_NAMES: [&str; 3] = ["realDonaldTrump", "mike_pence", "GOP"];

/// Label of a single account. Matching is exact and case-sensitive.
pub fn label_for(screen_name: &str) -> Label {
    if IN_GROUP_SCREEN_NAMES.contains(&screen_name) {
        0
    } else {
        1
    }
}

/// One label per row, read from the `screen_name` column.
pub fn create_labels(dataset: &Dataset) -> Result<Vec<Label>> {
    create_labels_from(dataset, SCREEN_NAME_FIELD)
}

/// One label per row, read from `field`.
pub fn create_labels_from(dataset: &Dataset, field: &str) -> Result<Vec<Label>> {
    Ok(dataset.texts(field)?.into_iter().map(label_for).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Row;
    use crate::error::PartisanError;

    fn accounts(names: &[&str]) -> Dataset {
        Dataset::from_rows(
            names
                .iter()
                .map(|name| Row::builder().add_text(SCREEN_NAME_FIELD, *name).build())
                .collect(),
        )
    }

    #[test]
    fn test_labels() {
        let dataset = accounts(&["realDonaldTrump", "mike_pence", "GOP", "other_account"]);
        assert_eq!(create_labels(&dataset).unwrap(), vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(label_for("gop"), 1);
        assert_eq!(label_for("GOP"), 0);
    }

    #[test]
    fn test_missing_column() {
        let dataset = Dataset::from_texts(["hello"]);
        assert!(matches!(create_labels(&dataset), Err(PartisanError::Field(_))));
    }
}
