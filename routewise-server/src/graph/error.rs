//! Fare graph construction errors.

/// Errors raised while turning tabular fare rows into a graph.
///
/// Row numbers are 1-based data rows (the header is not counted).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// An airport column is absent or blank
    #[error("row {row}: missing {field}")]
    MissingField { row: usize, field: &'static str },

    /// The fare is absent, not a number, negative or not finite
    #[error("row {row}: malformed record: {reason}")]
    MalformedRecord { row: usize, reason: String },
}

impl BuildError {
    /// The data row the error was detected on.
    pub fn row(&self) -> usize {
        match self {
            BuildError::MissingField { row, .. } | BuildError::MalformedRecord { row, .. } => *row,
        }
    }
}
