use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::square::{Diagonal, Square};

/// How row and column sums are compared.
///
/// Both modes also require the two diagonals to agree and their sum to be
/// one of the row sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SumCheck {
    /// The set of row sums equals the set of column sums.
    ///
    /// This is a weak equivalence: rows summing to `{8, 18, 19}` pass against
    /// columns summing to `{8, 18, 19}` even though no common total exists.
    SetEquality,
    /// All row sums and all column sums share one total, which the diagonals
    /// also hit.
    #[default]
    Uniform,
}

/// The sums of one square and the verdict under a [`SumCheck`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SumReport {
    pub n: usize,
    pub row_sums: Vec<u64>,
    pub column_sums: Vec<u64>,
    /// Main diagonal first, then the anti-diagonal.
    pub diagonal_sums: [u64; 2],
    /// `n(n² + 1) / 2`, the total every line of a normal magic square has.
    pub magic_constant: u64,
    pub mode: SumCheck,
    pub matches: bool,
}

/// Returns `n(n² + 1) / 2`, saturating at `u64::MAX`.
pub fn magic_constant(n: usize) -> u64 {
    let n = n as u128;
    n.checked_mul(n * n + 1)
        .and_then(|t| u64::try_from(t / 2).ok())
        .unwrap_or(u64::MAX)
}

/// Computes every line sum of `square` and compares them under `mode`.
pub fn check_sums(square: &Square, mode: SumCheck) -> SumReport {
    let n = square.n();
    let row_sums: Vec<u64> = (0..n).map(|r| square.row(r).sum()).collect();
    let column_sums: Vec<u64> = (0..n).map(|c| square.column(c).sum()).collect();
    let diagonal_sums = [
        square.diagonal(Diagonal::Main).sum(),
        square.diagonal(Diagonal::Anti).sum(),
    ];

    let row_set: BTreeSet<u64> = row_sums.iter().copied().collect();
    let column_set: BTreeSet<u64> = column_sums.iter().copied().collect();
    let sets_match = row_set == column_set;
    let diagonals_match =
        diagonal_sums[0] == diagonal_sums[1] && row_set.contains(&diagonal_sums[0]);

    let matches = match mode {
        SumCheck::SetEquality => sets_match && diagonals_match,
        SumCheck::Uniform => row_set.len() == 1 && sets_match && diagonals_match,
    };

    SumReport {
        n,
        row_sums,
        column_sums,
        diagonal_sums,
        magic_constant: magic_constant(n),
        mode,
        matches,
    }
}
