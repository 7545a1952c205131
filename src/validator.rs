use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ErrorKind, ValidationError};
use crate::grid::{Cell, check_structure};
use crate::square::Square;
use crate::sums::{SumCheck, SumReport, check_sums};

/// Parameters for the validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorParams {
    /// How line sums are compared once the grid is structurally valid.
    ///
    /// Defaults to [`SumCheck::Uniform`]. [`SumCheck::SetEquality`] only
    /// compares the sets of row and column sums.
    pub sum_check: SumCheck,
}

/// Result of validating a structurally sound grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MagicSquareOutcome {
    Magic { square: Square, magic_sum: u64 },
    SumMismatch(SumReport),
}

impl MagicSquareOutcome {
    pub fn is_magic(&self) -> bool {
        matches!(self, MagicSquareOutcome::Magic { .. })
    }

    /// Returns [`ErrorKind::SumMismatch`] for a mismatch, `None` otherwise.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            MagicSquareOutcome::Magic { .. } => None,
            MagicSquareOutcome::SumMismatch(_) => Some(ErrorKind::SumMismatch),
        }
    }
}

/// Validates grids against the magic square definition.
///
/// Stateless apart from its parameters; one validator can be shared freely
/// between threads.
///
/// # Example
///
/// ```
/// use magic_square::{SumCheck, Validator, ValidatorParams};
///
/// let lenient = Validator::new(ValidatorParams {
///     sum_check: SumCheck::SetEquality,
/// });
///
/// assert!(lenient.is_magic_square(&[[2, 7, 6], [9, 5, 1], [4, 3, 8]]));
/// assert!(!lenient.is_magic_square(&[[2, 7, 6], [9, 1, 5], [4, 3, 8]]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    params: ValidatorParams,
}

impl Validator {
    pub fn new(params: ValidatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ValidatorParams {
        &self.params
    }

    /// Runs the structural checks, then the sum comparison.
    ///
    /// Structural failures short-circuit; no sums are computed for them.
    pub fn validate<R, C>(&self, grid: &[R]) -> Result<MagicSquareOutcome, ValidationError>
    where
        R: AsRef<[C]>,
        C: Cell,
    {
        let square = check_structure(grid)?;
        trace!(n = square.n(), "grid is structurally valid");

        let report = check_sums(&square, self.params.sum_check);
        if report.matches {
            let magic_sum = report.row_sums[0];
            Ok(MagicSquareOutcome::Magic { square, magic_sum })
        } else {
            Ok(MagicSquareOutcome::SumMismatch(report))
        }
    }

    /// Returns `true` iff `grid` is a magic square.
    ///
    /// Never fails: every rejection becomes `false` with a debug diagnostic.
    pub fn is_magic_square<R, C>(&self, grid: &[R]) -> bool
    where
        R: AsRef<[C]>,
        C: Cell,
    {
        log_verdict(self.validate(grid))
    }

    /// Validates a grid held in a JSON value.
    ///
    /// Anything other than an array of arrays fails with
    /// [`ValidationError::NotTwoDimensional`]; cells are then checked as
    /// [`serde_json::Value`] cells.
    pub fn validate_json(
        &self,
        value: serde_json::Value,
    ) -> Result<MagicSquareOutcome, ValidationError> {
        let rows: Vec<Vec<serde_json::Value>> =
            serde_json::from_value(value).map_err(|_| ValidationError::NotTwoDimensional)?;
        self.validate(&rows)
    }

    /// [`Validator::is_magic_square`] for a grid held in a JSON value.
    pub fn is_magic_json(&self, value: serde_json::Value) -> bool {
        log_verdict(self.validate_json(value))
    }
}

/// Collapses a validation result to a verdict, logging why it was rejected.
fn log_verdict(result: Result<MagicSquareOutcome, ValidationError>) -> bool {
    match result {
        Ok(MagicSquareOutcome::Magic { square, magic_sum }) => {
            debug!(n = square.n(), magic_sum, "array is a magic square");
            true
        }
        Ok(MagicSquareOutcome::SumMismatch(report)) => {
            debug!(
                kind = ?ErrorKind::SumMismatch,
                rows = ?report.row_sums,
                columns = ?report.column_sums,
                diagonals = ?report.diagonal_sums,
                "sums do not match"
            );
            false
        }
        Err(err) => {
            debug!(kind = ?err.kind(), "{}", err);
            false
        }
    }
}

/// Validates `grid` with the default parameters.
pub fn validate<R, C>(grid: &[R]) -> Result<MagicSquareOutcome, ValidationError>
where
    R: AsRef<[C]>,
    C: Cell,
{
    Validator::default().validate(grid)
}

/// Returns `true` iff `grid` is a magic square, using the default parameters.
///
/// ```
/// use magic_square::is_magic_square;
///
/// assert!(is_magic_square(&[[2, 7, 6], [9, 5, 1], [4, 3, 8]]));
/// assert!(!is_magic_square(&[vec![7, 6], vec![9, 5, 1], vec![4, 3, 8]]));
/// ```
pub fn is_magic_square<R, C>(grid: &[R]) -> bool
where
    R: AsRef<[C]>,
    C: Cell,
{
    Validator::default().is_magic_square(grid)
}
