//! Fare dataset loading errors.

use std::path::PathBuf;

use crate::graph::BuildError;

/// Errors from reading a fare dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened
    #[error("cannot open fare file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The CSV itself is broken (bad quoting, ragged rows, invalid UTF-8)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is not in the header
    #[error("missing column {0:?} in fare file header")]
    MissingColumn(String),

    /// An effective/expiration date is not MM/DD/YYYY
    #[error("row {row}: invalid date {value:?} in {column}")]
    InvalidDate {
        row: usize,
        column: String,
        value: String,
    },

    /// A row failed fare record validation
    #[error(transparent)]
    Build(#[from] BuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LoadError::MissingColumn("YCA_FARE".into());
        assert_eq!(err.to_string(), "missing column \"YCA_FARE\" in fare file header");

        let err = LoadError::InvalidDate {
            row: 4,
            column: "EFFECTIVE_DATE".into(),
            value: "2025-10-01".into(),
        };
        assert_eq!(
            err.to_string(),
            "row 4: invalid date \"2025-10-01\" in EFFECTIVE_DATE"
        );

        let err = LoadError::from(BuildError::MissingField {
            row: 2,
            field: "origin",
        });
        assert_eq!(err.to_string(), "row 2: missing origin");
    }
}
