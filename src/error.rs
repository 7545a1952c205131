use serde::Serialize;
use thiserror::Error;

/// Why a grid failed the structural checks.
///
/// A sum mismatch is not an error: a structurally valid grid always gets a
/// [`MagicSquareOutcome`](crate::MagicSquareOutcome), magic or not.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// The grid has no rows.
    #[error("not a square array: grid is empty")]
    Empty,

    /// The input is not an array of arrays.
    #[error("not a square array: input is not two-dimensional")]
    NotTwoDimensional,

    /// A row's length differs from the row count.
    #[error("not a square array: {rows} rows but row {row} has {len} elements")]
    Shape { rows: usize, row: usize, len: usize },

    /// A cell holds something other than an integer.
    #[error("cell ({row}, {col}) is not an integer")]
    ElementType { row: usize, col: usize },

    /// The distinct elements are not exactly `1..=n²`.
    #[error("elements are not 1..n²: {0}")]
    Range(RangeViolation),
}

impl ValidationError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Empty
            | ValidationError::NotTwoDimensional
            | ValidationError::Shape { .. } => ErrorKind::Shape,
            ValidationError::ElementType { .. } => ErrorKind::ElementType,
            ValidationError::Range(_) => ErrorKind::Range,
        }
    }
}

/// Detail for [`ValidationError::Range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum RangeViolation {
    /// `value` lies outside `1..=max`.
    OutOfRange { value: i64, max: i64 },
    /// `value` appears more than once, so `missing` never appears.
    Duplicate { value: i64, missing: i64 },
}

impl std::fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeViolation::OutOfRange { value, max } => {
                write!(f, "{} is outside 1..={}", value, max)
            }
            RangeViolation::Duplicate { value, missing } => {
                write!(f, "{} is repeated and {} is missing", value, missing)
            }
        }
    }
}

/// Failure classification, reported alongside diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Shape,
    ElementType,
    Range,
    SumMismatch,
}
