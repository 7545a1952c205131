//! Constructions of normal magic squares.
//!
//! Every order except 2 has one:
//! - odd `n`: the Siamese (De la Loubère) method;
//! - `n ≡ 0 (mod 4)`: the doubly-even complement method;
//! - `n ≡ 2 (mod 4)`: Conway's LUX method over a Siamese square of order `n / 2`.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::square::{Square, Symmetry};

impl Square {
    /// Builds a magic square of order `n`.
    ///
    /// Returns `None` for `n == 0` and `n == 2`, where none exists.
    pub fn magic(n: usize) -> Option<Self> {
        let cells = match n {
            0 | 2 => return None,
            n if n % 2 == 1 => siamese(n),
            n if n % 4 == 0 => doubly_even(n),
            n => lux(n),
        };
        Some(Self::from_cells_unchecked(n, cells))
    }
}

/// Generates a magic square of order `n` under a uniformly random symmetry.
///
/// The output is deterministic given the same rng state.
///
/// # Example
///
/// ```
/// use magic_square::{generate, is_magic_square};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let mut rng = ChaCha20Rng::seed_from_u64(0);
/// let sq = generate(5, &mut rng).unwrap();
/// assert!(is_magic_square(&sq.to_rows()));
/// ```
pub fn generate<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Option<Square> {
    let base = Square::magic(n)?;
    let symmetry = *Symmetry::ALL.choose(rng)?;
    Some(base.transform(symmetry))
}

fn siamese(n: usize) -> Vec<u64> {
    let mut cells = vec![0u64; n * n];
    let (mut r, mut c) = (0, n / 2);
    for k in 1..=(n * n) as u64 {
        cells[r * n + c] = k;
        // Up and to the right, wrapping; drop down one when blocked.
        let (up, right) = ((r + n - 1) % n, (c + 1) % n);
        if cells[up * n + right] == 0 {
            (r, c) = (up, right);
        } else {
            r = (r + 1) % n;
        }
    }
    cells
}

fn doubly_even(n: usize) -> Vec<u64> {
    let total = (n * n) as u64;
    (0..n)
        .flat_map(|r| (0..n).map(move |c| (r, c)))
        .map(|(r, c)| {
            let k = (r * n + c) as u64 + 1;
            let (i, j) = (r % 4, c % 4);
            if i == j || i + j == 3 { total + 1 - k } else { k }
        })
        .collect()
}

fn lux(n: usize) -> Vec<u64> {
    const L: [[u64; 2]; 2] = [[4, 1], [2, 3]];
    const U: [[u64; 2]; 2] = [[1, 4], [2, 3]];
    const X: [[u64; 2]; 2] = [[1, 4], [3, 2]];

    let m = (n - 2) / 4;
    let half = 2 * m + 1;
    let base = siamese(half);

    let mut cells = vec![0u64; n * n];
    for i in 0..half {
        for j in 0..half {
            // m+1 rows of L, one row of U, m-1 rows of X, with the centre
            // U swapped for the L above it.
            let pattern = match (i, j) {
                (i, j) if i == m && j == m => &U,
                (i, j) if i == m + 1 && j == m => &L,
                (i, _) if i <= m => &L,
                (i, _) if i == m + 1 => &U,
                _ => &X,
            };
            let offset = 4 * (base[i * half + j] - 1);
            for (di, row) in pattern.iter().enumerate() {
                for (dj, v) in row.iter().enumerate() {
                    cells[(2 * i + di) * n + 2 * j + dj] = offset + v;
                }
            }
        }
    }
    cells
}
