//! Structural checks: shape, element type, and the `1..=n²` range.

use crate::Square;
use crate::error::{RangeViolation, ValidationError};

/// A grid cell that may or may not hold an integer.
///
/// `None` from [`Cell::as_integer`] marks a non-integer value, which fails
/// validation with [`ValidationError::ElementType`]. Integers too large for
/// `i64` are clamped to `i64::MAX` and so fail the range check instead.
pub trait Cell {
    fn as_integer(&self) -> Option<i64>;
}

macro_rules! impl_cell_lossless {
    ($($t:ty),*) => {
        $(impl Cell for $t {
            #[inline]
            fn as_integer(&self) -> Option<i64> {
                Some(i64::from(*self))
            }
        })*
    };
}

macro_rules! impl_cell_clamped {
    ($($t:ty),*) => {
        $(impl Cell for $t {
            #[inline]
            fn as_integer(&self) -> Option<i64> {
                Some(i64::try_from(*self).unwrap_or(if *self > 0 { i64::MAX } else { i64::MIN }))
            }
        })*
    };
}

impl_cell_lossless!(i8, i16, i32, i64, u8, u16, u32);
impl_cell_clamped!(i128, isize, u64, u128, usize);

impl<C: Cell> Cell for Option<C> {
    fn as_integer(&self) -> Option<i64> {
        self.as_ref().and_then(Cell::as_integer)
    }
}

impl<C: Cell + ?Sized> Cell for &C {
    fn as_integer(&self) -> Option<i64> {
        (**self).as_integer()
    }
}

/// Only integral JSON numbers count; `2.0`, strings and `null` do not.
impl Cell for serde_json::Value {
    fn as_integer(&self) -> Option<i64> {
        match self {
            serde_json::Value::Number(num) => num
                .as_i64()
                .or_else(|| num.as_u64().map(|_| i64::MAX)),
            _ => None,
        }
    }
}

/// Checks that `grid` is square, integral, and holds exactly `1..=n²`.
///
/// Checks run in that order and stop at the first failure. On success the
/// flattened cells are returned as a [`Square`] for the sum phase.
pub fn check_structure<R, C>(grid: &[R]) -> Result<Square, ValidationError>
where
    R: AsRef<[C]>,
    C: Cell,
{
    let n = grid.len();
    if n == 0 {
        return Err(ValidationError::Empty);
    }
    if let Some((row, len)) = grid
        .iter()
        .map(|r| r.as_ref().len())
        .enumerate()
        .find(|&(_, len)| len != n)
    {
        return Err(ValidationError::Shape { rows: n, row, len });
    }

    let mut values = Vec::with_capacity(n * n);
    for (row, cells) in grid.iter().enumerate() {
        for (col, cell) in cells.as_ref().iter().enumerate() {
            let value = cell
                .as_integer()
                .ok_or(ValidationError::ElementType { row, col })?;
            values.push(value);
        }
    }

    let cells = check_range(&values).map_err(ValidationError::Range)?;
    Ok(Square::from_cells_unchecked(n, cells))
}

/// Checks that `values` is a permutation of `1..=values.len()`.
fn check_range(values: &[i64]) -> Result<Vec<u64>, RangeViolation> {
    let total = values.len();
    let max = i64::try_from(total).unwrap_or(i64::MAX);

    if let Some(&value) = values.iter().find(|&&v| v < 1 || v > max) {
        return Err(RangeViolation::OutOfRange { value, max });
    }

    let mut seen = vec![false; total];
    let mut duplicate = None;
    for &v in values {
        let slot = &mut seen[(v - 1) as usize];
        if *slot {
            duplicate.get_or_insert(v);
        }
        *slot = true;
    }

    match duplicate {
        None => Ok(values.iter().map(|&v| v as u64).collect()),
        Some(value) => {
            // n² values in 1..=n² with a repeat must leave a gap.
            let missing = seen.iter().position(|&s| !s).unwrap_or(0) as i64 + 1;
            Err(RangeViolation::Duplicate { value, missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_lo_shu() {
        let sq = check_structure(&[[2, 7, 6], [9, 5, 1], [4, 3, 8]]).unwrap();
        assert_eq!(sq.n(), 3);
        assert_eq!(sq.cells(), &[2, 7, 6, 9, 5, 1, 4, 3, 8]);
    }

    #[test]
    fn rejects_empty() {
        let grid: Vec<Vec<i32>> = vec![];
        assert_eq!(check_structure(&grid), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_ragged() {
        let grid = vec![vec![7, 6], vec![9, 5, 1], vec![4, 3, 8]];
        assert_eq!(
            check_structure(&grid),
            Err(ValidationError::Shape {
                rows: 3,
                row: 0,
                len: 2
            })
        );
    }

    #[test]
    fn rejects_rectangular() {
        let grid = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert!(matches!(
            check_structure(&grid),
            Err(ValidationError::Shape { rows: 2, row: 0, len: 3 })
        ));
    }

    #[test]
    fn rejects_missing_marker() {
        let grid = vec![
            vec![None, Some(7), Some(6)],
            vec![Some(9), Some(1), Some(5)],
            vec![Some(4), Some(3), Some(8)],
        ];
        assert_eq!(
            check_structure(&grid),
            Err(ValidationError::ElementType { row: 0, col: 0 })
        );
    }

    #[test]
    fn missing_marker_found_anywhere() {
        let grid = vec![
            vec![Some(2), Some(7), Some(6)],
            vec![Some(9), Some(5), Some(1)],
            vec![Some(4), None, Some(8)],
        ];
        assert_eq!(
            check_structure(&grid),
            Err(ValidationError::ElementType { row: 2, col: 1 })
        );
    }

    #[test]
    fn shape_is_checked_before_element_type() {
        let grid = vec![vec![None, Some(1)], vec![Some(2)]];
        assert!(matches!(
            check_structure(&grid),
            Err(ValidationError::Shape { .. })
        ));
    }

    #[test]
    fn rejects_negative() {
        let grid = [[-2, 7, 6], [9, 5, 1], [4, 3, 8]];
        assert_eq!(
            check_structure(&grid),
            Err(ValidationError::Range(RangeViolation::OutOfRange {
                value: -2,
                max: 9
            }))
        );
    }

    #[test]
    fn rejects_values_not_starting_at_one() {
        let grid = [
            [2, 16, 15, 5],
            [13, 7, 8, 10],
            [9, 11, 12, 6],
            [14, 4, 3, 17],
        ];
        assert_eq!(
            check_structure(&grid),
            Err(ValidationError::Range(RangeViolation::OutOfRange {
                value: 17,
                max: 16
            }))
        );
    }

    #[test]
    fn rejects_duplicate_with_gap() {
        let grid = [[2, 7, 6], [9, 5, 1], [4, 3, 7]];
        assert_eq!(
            check_structure(&grid),
            Err(ValidationError::Range(RangeViolation::Duplicate {
                value: 7,
                missing: 8
            }))
        );
    }

    #[test]
    fn json_cells() {
        let grid: Vec<Vec<serde_json::Value>> =
            serde_json::from_value(json!([[2, 7, 6], [9, 5, 1], [4, 3, 8]])).unwrap();
        assert!(check_structure(&grid).is_ok());

        let grid: Vec<Vec<serde_json::Value>> =
            serde_json::from_value(json!([[2.0, 7, 6], [9, 5, 1], [4, 3, 8]])).unwrap();
        assert_eq!(
            check_structure(&grid),
            Err(ValidationError::ElementType { row: 0, col: 0 })
        );

        let grid: Vec<Vec<serde_json::Value>> =
            serde_json::from_value(json!([["1"]])).unwrap();
        assert_eq!(
            check_structure(&grid),
            Err(ValidationError::ElementType { row: 0, col: 0 })
        );
    }

    #[test]
    fn huge_unsigned_is_out_of_range() {
        let grid = [[u64::MAX]];
        assert_eq!(
            check_structure(&grid),
            Err(ValidationError::Range(RangeViolation::OutOfRange {
                value: i64::MAX,
                max: 1
            }))
        );
    }
}
