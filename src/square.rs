use std::iter::StepBy;
use std::ops::Range;

use serde::Serialize;

/// A square grid of order `n` holding exactly the integers `1..=n²`.
///
/// Values are only obtained through [`check_structure`](crate::check_structure)
/// or the constructions in this crate, so the range property always holds.
/// Whether the row, column and diagonal sums agree is a separate question
/// answered by [`check_sums`](crate::check_sums).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Square {
    n: usize,
    cells: Vec<u64>,
}

/// One of the two main diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagonal {
    /// Top-left to bottom-right.
    Main,
    /// Top-right to bottom-left.
    Anti,
}

/// The eight symmetries of the square (the dihedral group D4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    /// Quarter turn clockwise.
    Rotate90,
    Rotate180,
    Rotate270,
    /// Mirror across the vertical axis.
    FlipHorizontal,
    /// Mirror across the horizontal axis.
    FlipVertical,
    /// Mirror across the main diagonal.
    Transpose,
    /// Mirror across the anti-diagonal.
    AntiTranspose,
}

impl Symmetry {
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::Rotate90,
        Symmetry::Rotate180,
        Symmetry::Rotate270,
        Symmetry::FlipHorizontal,
        Symmetry::FlipVertical,
        Symmetry::Transpose,
        Symmetry::AntiTranspose,
    ];

    /// Maps a target position `(r, c)` to the source position it is read from.
    fn source(self, n: usize, r: usize, c: usize) -> (usize, usize) {
        let last = n - 1;
        match self {
            Symmetry::Identity => (r, c),
            Symmetry::Rotate90 => (last - c, r),
            Symmetry::Rotate180 => (last - r, last - c),
            Symmetry::Rotate270 => (c, last - r),
            Symmetry::FlipHorizontal => (r, last - c),
            Symmetry::FlipVertical => (last - r, c),
            Symmetry::Transpose => (c, r),
            Symmetry::AntiTranspose => (last - c, last - r),
        }
    }
}

impl Square {
    /// Wraps row-major cells without checking the range property.
    pub(crate) fn from_cells_unchecked(n: usize, cells: Vec<u64>) -> Self {
        debug_assert_eq!(cells.len(), n * n);
        Self { n, cells }
    }

    /// Returns the order of the square.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the value at position `(r, c)`.
    ///
    /// # Panics
    /// Panics if `r >= n` or `c >= n`.
    pub fn get(&self, r: usize, c: usize) -> u64 {
        assert!(r < self.n && c < self.n, "index out of bounds");
        self.cells[r * self.n + c]
    }

    /// Returns the cells as a flat slice in row-major order.
    ///
    /// The cell at position (r, c) is at index `r * n + c`.
    pub fn cells(&self) -> &[u64] {
        &self.cells
    }

    /// Returns the cells as a vector of rows.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.cells.chunks(self.n).map(<[u64]>::to_vec).collect()
    }

    /// Flat positions of row `r`.
    pub fn row_indices(&self, r: usize) -> Range<usize> {
        r * self.n..(r + 1) * self.n
    }

    /// Flat positions of column `c`.
    pub fn column_indices(&self, c: usize) -> StepBy<Range<usize>> {
        (c..self.cells.len()).step_by(self.n)
    }

    /// Flat positions of a main diagonal.
    pub fn diagonal_indices(&self, diagonal: Diagonal) -> impl Iterator<Item = usize> + use<> {
        let n = self.n;
        (0..n).map(move |i| match diagonal {
            Diagonal::Main => i * (n + 1),
            Diagonal::Anti => i * n + (n - 1 - i),
        })
    }

    /// Values of row `r`, left to right.
    ///
    /// # Panics
    /// Panics if `r >= n`.
    pub fn row(&self, r: usize) -> impl Iterator<Item = u64> + '_ {
        assert!(r < self.n, "row index out of bounds");
        self.row_indices(r).map(|i| self.cells[i])
    }

    /// Values of column `c`, top to bottom.
    ///
    /// # Panics
    /// Panics if `c >= n`.
    pub fn column(&self, c: usize) -> impl Iterator<Item = u64> + '_ {
        assert!(c < self.n, "column index out of bounds");
        self.column_indices(c).map(|i| self.cells[i])
    }

    /// Values of a main diagonal, top row first.
    pub fn diagonal(&self, diagonal: Diagonal) -> impl Iterator<Item = u64> + '_ {
        self.diagonal_indices(diagonal).map(|i| self.cells[i])
    }

    /// Returns the image of this square under `symmetry`.
    ///
    /// Every symmetry maps rows and columns onto rows and columns and swaps
    /// or fixes the diagonals, so magic squares stay magic.
    pub fn transform(&self, symmetry: Symmetry) -> Square {
        let n = self.n;
        let cells = (0..n)
            .flat_map(|r| (0..n).map(move |c| (r, c)))
            .map(|(r, c)| {
                let (sr, sc) = symmetry.source(n, r, c);
                self.cells[sr * n + sc]
            })
            .collect();
        Self { n, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lo_shu() -> Square {
        Square::from_cells_unchecked(3, vec![2, 7, 6, 9, 5, 1, 4, 3, 8])
    }

    #[test]
    fn index_groupings() {
        let sq = Square::from_cells_unchecked(4, (1..=16).collect());
        assert_eq!(sq.row_indices(1).collect::<Vec<_>>(), vec![4, 5, 6, 7]);
        assert_eq!(sq.column_indices(2).collect::<Vec<_>>(), vec![2, 6, 10, 14]);
        assert_eq!(
            sq.diagonal_indices(Diagonal::Main).collect::<Vec<_>>(),
            vec![0, 5, 10, 15]
        );
        assert_eq!(
            sq.diagonal_indices(Diagonal::Anti).collect::<Vec<_>>(),
            vec![3, 6, 9, 12]
        );
    }

    #[test]
    fn order_one_diagonals_share_the_cell() {
        let sq = Square::from_cells_unchecked(1, vec![1]);
        assert_eq!(sq.diagonal(Diagonal::Main).collect::<Vec<_>>(), vec![1]);
        assert_eq!(sq.diagonal(Diagonal::Anti).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn views_read_the_right_cells() {
        let sq = lo_shu();
        assert_eq!(sq.row(1).collect::<Vec<_>>(), vec![9, 5, 1]);
        assert_eq!(sq.column(0).collect::<Vec<_>>(), vec![2, 9, 4]);
        assert_eq!(sq.diagonal(Diagonal::Anti).collect::<Vec<_>>(), vec![6, 5, 4]);
        assert_eq!(sq.get(2, 2), 8);
        assert_eq!(sq.to_rows(), vec![vec![2, 7, 6], vec![9, 5, 1], vec![4, 3, 8]]);
    }

    #[test]
    #[should_panic(expected = "row index out of bounds")]
    fn row_out_of_bounds_panics() {
        let _ = lo_shu().row(3);
    }

    #[test]
    #[should_panic(expected = "column index out of bounds")]
    fn column_out_of_bounds_panics() {
        let _ = lo_shu().column(3);
    }

    #[test]
    fn rotations_compose() {
        let sq = lo_shu();
        assert_eq!(
            sq.transform(Symmetry::Rotate90).to_rows(),
            vec![vec![4, 9, 2], vec![3, 5, 7], vec![8, 1, 6]]
        );
        let twice = sq
            .transform(Symmetry::Rotate90)
            .transform(Symmetry::Rotate90);
        assert_eq!(twice, sq.transform(Symmetry::Rotate180));
        let thrice = twice.transform(Symmetry::Rotate90);
        assert_eq!(thrice, sq.transform(Symmetry::Rotate270));
        assert_eq!(thrice.transform(Symmetry::Rotate90), sq);
    }

    #[test]
    fn reflections_are_involutions() {
        let sq = lo_shu();
        for sym in [
            Symmetry::FlipHorizontal,
            Symmetry::FlipVertical,
            Symmetry::Transpose,
            Symmetry::AntiTranspose,
        ] {
            assert_eq!(sq.transform(sym).transform(sym), sq, "{:?}", sym);
        }
        assert_eq!(
            sq.transform(Symmetry::Transpose).to_rows(),
            vec![vec![2, 9, 4], vec![7, 5, 3], vec![6, 1, 8]]
        );
    }

    #[test]
    fn symmetries_are_distinct_on_lo_shu() {
        let images: std::collections::HashSet<_> = Symmetry::ALL
            .iter()
            .map(|&s| lo_shu().transform(s))
            .collect();
        assert_eq!(images.len(), 8);
    }
}
