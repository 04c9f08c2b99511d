//! Product-of-Sums expressions built from a cover of the OFF-set.
//!
//! Every implicant of the cover becomes one sum term: a `0` position
//! contributes the plain variable, a `1` position the complemented variable,
//! and a don't-care contributes nothing. The sum term is false exactly on the
//! rows its implicant subsumes, so the product is false exactly on the
//! covered complements.

use std::fmt;

use crate::term::{Bit, Term};

/// A possibly complemented variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Literal {
    pub variable: char,
    pub negated: bool,
}

impl Literal {
    pub fn positive(variable: char) -> Self {
        Self {
            variable,
            negated: false,
        }
    }

    pub fn negative(variable: char) -> Self {
        Self {
            variable,
            negated: true,
        }
    }

    pub fn evaluate(&self, value: bool) -> bool {
        value != self.negated
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}'", self.variable)
        } else {
            write!(f, "{}", self.variable)
        }
    }
}

/// Disjunction of literals. An empty sum is the constant `0`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SumTerm {
    pub literals: Vec<Literal>,
}

impl SumTerm {
    /// Sum term of an implicant over `variables`.
    ///
    /// Only the first `min(implicant.len(), variables.len())` positions are rendered.
    pub fn from_implicant(implicant: &Term, variables: &[char]) -> Self {
        let literals = implicant
            .bits()
            .iter()
            .zip(variables)
            .filter_map(|(&bit, &variable)| match bit {
                Bit::Zero => Some(Literal::positive(variable)),
                Bit::One => Some(Literal::negative(variable)),
                Bit::DontCare => None,
            })
            .collect();
        Self { literals }
    }

    pub fn evaluate(&self, assignment: impl Fn(char) -> bool) -> bool {
        self.literals
            .iter()
            .any(|lit| lit.evaluate(assignment(lit.variable)))
    }
}

impl fmt::Display for SumTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "0");
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}

/// Conjunction of sum terms. An empty product is the constant `1`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PosExpression {
    pub sums: Vec<SumTerm>,
}

impl PosExpression {
    pub fn from_cover(cover: &[Term], variables: &[char]) -> Self {
        let sums = cover
            .iter()
            .map(|implicant| SumTerm::from_implicant(implicant, variables))
            .collect();
        Self { sums }
    }

    /// Textual form of each sum term, index-aligned with the cover.
    pub fn term_breakdown(&self) -> Vec<String> {
        self.sums.iter().map(|sum| sum.to_string()).collect()
    }

    pub fn is_tautology(&self) -> bool {
        self.sums.is_empty()
    }

    pub fn evaluate(&self, assignment: impl Fn(char) -> bool) -> bool {
        self.sums.iter().all(|sum| sum.evaluate(&assignment))
    }

    /// Evaluates the expression on a truth-table row.
    ///
    /// The first variable is the most significant bit of a `variables.len()`-wide row.
    pub fn evaluate_row(&self, row: u32, variables: &[char]) -> bool {
        let width = variables.len();
        self.evaluate(|v| {
            variables
                .iter()
                .position(|&x| x == v)
                .is_some_and(|pos| (row >> (width - 1 - pos)) & 1 == 1)
        })
    }
}

impl fmt::Display for PosExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sums.as_slice() {
            [] => write!(f, "1"),
            [single] => write!(f, "{}", single),
            sums => {
                for sum in sums {
                    write!(f, "({})", sum)?;
                }
                Ok(())
            }
        }
    }
}
