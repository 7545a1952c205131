#![doc = include_str!("../README.md")]

mod construct;
mod error;
mod grid;
mod square;
mod sums;
mod validator;
#[cfg(feature = "wasm")]
mod wasm;

pub use construct::generate;
pub use error::{ErrorKind, RangeViolation, ValidationError};
pub use grid::{Cell, check_structure};
pub use square::{Diagonal, Square, Symmetry};
pub use sums::{SumCheck, SumReport, check_sums, magic_constant};
pub use validator::{MagicSquareOutcome, Validator, ValidatorParams, is_magic_square, validate};
