//! The full minimization pipeline and its result record.

use log::debug;

use crate::chart::{find_minimal_cover, PiChart};
use crate::complement::derive_complements;
use crate::expr::PosExpression;
use crate::group::{group_by_popcount, PopcountGroups};
use crate::merge::{find_prime_implicants, Coverage, Iteration};
use crate::term::Term;

/// Everything the pipeline derives, step by step.
///
/// Consumers read this record field by field; nothing here needs recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minimization {
    pub minterms: Vec<u32>,
    pub variables: Vec<char>,
    pub width: usize,
    pub complements: Vec<u32>,
    pub binary_numbers: Vec<Term>,
    pub binary_groups: PopcountGroups<Term>,
    pub minterm_groups: PopcountGroups<u32>,
    pub prime_implicants: Vec<Term>,
    pub pi_coverage: Coverage,
    pub iterations: Vec<Iteration>,
    pub essential_pis: Vec<Term>,
    pub additional_pis: Vec<Term>,
    pub minimal_cover: Vec<Term>,
    pub pos: PosExpression,
    pub expression: String,
    /// Sum term of each implicant, index-aligned with `minimal_cover`.
    pub term_breakdown: Vec<String>,
}

impl Minimization {
    /// Prime-implicant chart of this result.
    pub fn chart(&self) -> PiChart {
        PiChart::new(&self.prime_implicants, &self.pi_coverage, &self.complements)
    }

    /// Value of the minimized expression on a truth-table row.
    ///
    /// The row is read with one bit per variable, first variable most significant.
    ///
    /// # Panics
    ///
    /// Panics if the bit width exceeds the number of variables, since the
    /// expression then only mentions the leading positions of each implicant.
    pub fn evaluate(&self, row: u32) -> bool {
        assert_eq!(
            self.width,
            self.variables.len(),
            "Cannot evaluate a {}-bit result over {} variables",
            self.width,
            self.variables.len()
        );
        self.pos.evaluate_row(row, &self.variables)
    }
}

/// Minimizes the function that is true exactly on `minterms` into Product-of-Sums form.
///
/// The input is expected to be validated: distinct minterms, at least one,
/// and distinct variable symbols.
///
/// # Panics
///
/// Panics if `minterms` or `variables` is empty, or if the implied bit width
/// exceeds [`MAX_WIDTH`][crate::complement::MAX_WIDTH].
///
/// # Examples
///
/// ```
/// use qmc_rs::minimize::minimize;
///
/// let result = minimize(&[0], &['A', 'B']);
/// assert_eq!(result.complements, vec![1, 2, 3]);
/// assert_eq!(result.expression, "(B')(A')");
/// assert!(result.evaluate(0));
/// assert!(!result.evaluate(3));
/// ```
pub fn minimize(minterms: &[u32], variables: &[char]) -> Minimization {
    debug!("minimize(minterms = {:?}, variables = {:?})", minterms, variables);

    let complements = derive_complements(minterms, variables);
    let (binary_groups, minterm_groups) = group_by_popcount(&complements);
    let outcome = find_prime_implicants(&binary_groups, &minterm_groups);

    let chart = PiChart::new(
        &outcome.prime_implicants,
        &outcome.coverage,
        &complements.complements,
    );
    let cover = find_minimal_cover(&chart);

    let pos = PosExpression::from_cover(&cover.minimal, variables);
    let expression = pos.to_string();
    let term_breakdown = pos.term_breakdown();
    debug!("minimize: expression = {}", expression);

    Minimization {
        minterms: minterms.to_vec(),
        variables: variables.to_vec(),
        width: complements.width,
        complements: complements.complements,
        binary_numbers: complements.binary_numbers,
        binary_groups,
        minterm_groups,
        prime_implicants: outcome.prime_implicants,
        pi_coverage: outcome.coverage,
        iterations: outcome.iterations,
        essential_pis: cover.essential,
        additional_pis: cover.additional,
        minimal_cover: cover.minimal,
        pos,
        expression,
        term_breakdown,
    }
}
