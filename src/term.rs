//! Cube patterns over `{0, 1, _}`.
//!
//! A [`Term`] is a fixed-width vector of [`Bit`]s, most significant position first.
//! A term without don't-cares is the binary encoding of a single row;
//! every [`Bit::DontCare`] doubles the set of rows the term subsumes.

use std::fmt;
use std::str::FromStr;

/// A single position of a [`Term`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Bit {
    Zero,
    One,
    DontCare,
}

impl Bit {
    pub fn to_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
            Bit::DontCare => '_',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            '_' => Some(Bit::DontCare),
            _ => None,
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A cube pattern of fixed width.
///
/// # Invariants
///
/// - The width never changes after construction: [`Term::merge`] only
///   replaces a position, it never inserts or removes one.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Term {
    bits: Vec<Bit>,
}

impl Term {
    pub fn new(bits: Vec<Bit>) -> Self {
        Self { bits }
    }

    /// Binary encoding of `value`, left-padded with zeros to `width` positions.
    ///
    /// # Panics
    ///
    /// Panics if `value` does not fit into `width` bits.
    pub fn literal(value: u32, width: usize) -> Self {
        assert!(
            width >= 32 || value >> width == 0,
            "Value {} does not fit into {} bits",
            value,
            width
        );
        let bits = (0..width)
            .rev()
            .map(|i| {
                if i < 32 && (value >> i) & 1 == 1 {
                    Bit::One
                } else {
                    Bit::Zero
                }
            })
            .collect();
        Self { bits }
    }

    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of [`Bit::One`] positions. Don't-cares do not count.
    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == Bit::One).count()
    }

    pub fn dont_cares(&self) -> usize {
        self.bits.iter().filter(|&&b| b == Bit::DontCare).count()
    }

    /// Merges two terms differing in exactly one position.
    ///
    /// The result is `self` with the differing position replaced by [`Bit::DontCare`].
    /// Don't-care positions must coincide: `_` only matches `_`.
    pub fn merge(&self, other: &Term) -> Option<Term> {
        if self.len() != other.len() {
            return None;
        }

        let mut diff = None;
        for (i, (a, b)) in self.bits.iter().zip(other.bits.iter()).enumerate() {
            if a != b {
                if diff.is_some() {
                    return None;
                }
                diff = Some(i);
            }
        }

        let i = diff?;
        let mut bits = self.bits.clone();
        bits[i] = Bit::DontCare;
        Some(Term { bits })
    }

    /// Returns true if `row` (interpreted with the same width) is subsumed by this pattern.
    pub fn matches(&self, row: u32) -> bool {
        let width = self.len();
        if width < 32 && row >> width != 0 {
            return false;
        }
        self.bits.iter().enumerate().all(|(pos, &bit)| {
            let shift = width - 1 - pos;
            let value = shift < 32 && (row >> shift) & 1 == 1;
            match bit {
                Bit::Zero => !value,
                Bit::One => value,
                Bit::DontCare => true,
            }
        })
    }

    /// All rows subsumed by this pattern, in ascending order.
    pub fn rows(&self) -> Vec<u32> {
        let width = self.len();
        let mut base = 0u32;
        let mut free = Vec::new();
        for (pos, &bit) in self.bits.iter().enumerate() {
            let mask = 1u32 << (width - 1 - pos);
            match bit {
                Bit::Zero => {}
                Bit::One => base |= mask,
                Bit::DontCare => free.push(mask),
            }
        }
        // Lowest masks toggle fastest, which keeps the output sorted.
        free.reverse();

        let mut rows = Vec::with_capacity(1 << free.len());
        for filter in 0u32..1 << free.len() {
            let mut row = base;
            for (n, &mask) in free.iter().enumerate() {
                if (filter >> n) & 1 == 1 {
                    row |= mask;
                }
            }
            rows.push(row);
        }
        rows
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term({})", self)
    }
}

/// Error returned when parsing a [`Term`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTermError {
    /// The input string was empty
    Empty,
    /// A character outside of `{0, 1, _}` was found
    InvalidSymbol {
        /// The offending character
        symbol: char,
        /// Its position in the input
        position: usize,
    },
}

impl fmt::Display for ParseTermError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTermError::Empty => write!(f, "Term must not be empty"),
            ParseTermError::InvalidSymbol { symbol, position } => write!(
                f,
                "Invalid symbol '{}' at position {} (expected '0', '1' or '_')",
                symbol, position
            ),
        }
    }
}

impl std::error::Error for ParseTermError {}

impl FromStr for Term {
    type Err = ParseTermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseTermError::Empty);
        }
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                Bit::from_char(symbol).ok_or(ParseTermError::InvalidSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Term { bits })
    }
}
