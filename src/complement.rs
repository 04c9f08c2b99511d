//! Derivation of the complement (OFF-set) of a function given by its minterms.

use log::debug;

use crate::rowset::RowSet;
use crate::term::Term;

/// Largest supported bit width. The deriver enumerates all `2^width` rows.
pub const MAX_WIDTH: usize = 16;

/// Rows where the function evaluates to 0, with their binary encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complements {
    /// Complement rows in ascending order.
    pub complements: Vec<u32>,
    /// Binary encoding of each complement, index-aligned with `complements`.
    pub binary_numbers: Vec<Term>,
    /// Bit width `n` of every term.
    pub width: usize,
}

/// Number of binary digits needed to write `value`. Zero takes one digit.
pub fn bit_length(value: u32) -> usize {
    if value == 0 {
        1
    } else {
        (u32::BITS - value.leading_zeros()) as usize
    }
}

/// Enumerates all rows of `0..2^n` not listed in `minterms`.
///
/// The width `n` is the larger of the bit length of the largest minterm
/// and the number of variables.
///
/// # Panics
///
/// Panics if `minterms` or `variables` is empty, or if the width exceeds [`MAX_WIDTH`].
pub fn derive_complements(minterms: &[u32], variables: &[char]) -> Complements {
    assert!(!minterms.is_empty(), "Minterm set must not be empty");
    assert!(!variables.is_empty(), "Variable list must not be empty");

    let largest = minterms.iter().copied().max().unwrap_or_default();
    let width = bit_length(largest).max(variables.len());
    assert!(
        width <= MAX_WIDTH,
        "Bit width {} exceeds the maximum of {}",
        width,
        MAX_WIDTH
    );

    let total = 1u32 << width;
    let present: RowSet = minterms.iter().copied().collect();

    let complements: Vec<u32> = (0..total).filter(|&row| !present.contains(row)).collect();
    let binary_numbers = complements
        .iter()
        .map(|&row| Term::literal(row, width))
        .collect();

    debug!(
        "derive_complements(minterms = {:?}, width = {}) -> {} complements",
        minterms,
        width,
        complements.len()
    );

    Complements {
        complements,
        binary_numbers,
        width,
    }
}
