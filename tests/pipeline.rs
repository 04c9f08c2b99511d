//! End-to-end tests for the minimization pipeline.
//!
//! Tests cover the degenerate inputs, the structure of the result record,
//! and exhaustive checks over every function of up to three variables.

use std::collections::HashSet;

use qmc_rs::minimize::{minimize, Minimization};
use qmc_rs::term::Term;

fn names(terms: &[Term]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

/// All non-empty subsets of `0..2^width`, as ascending minterm lists.
fn all_functions(width: usize) -> impl Iterator<Item = Vec<u32>> {
    let rows = 1u32 << width;
    (1u64..1 << rows).map(move |mask| (0..rows).filter(|&r| mask & (1 << r) != 0).collect())
}

const VARIABLES: [char; 3] = ['A', 'B', 'C'];

// ─── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn single_variable_single_complement() {
    let result = minimize(&[1], &['A']);
    assert_eq!(result.complements, vec![0]);
    assert_eq!(names(&result.binary_numbers), ["0"]);
    assert_eq!(names(&result.prime_implicants), ["0"]);
    assert_eq!(names(&result.minimal_cover), ["0"]);
    assert_eq!(result.expression, "A");
    assert_eq!(result.term_breakdown, ["A"]);
    assert!(result.iterations.is_empty());
}

#[test]
fn single_variable_tautology() {
    let result = minimize(&[0, 1], &['A']);
    assert!(result.complements.is_empty());
    assert!(result.prime_implicants.is_empty());
    assert!(result.minimal_cover.is_empty());
    assert!(result.term_breakdown.is_empty());
    assert_eq!(result.expression, "1");
}

#[test]
fn two_variable_tautology() {
    let result = minimize(&[0, 1, 2, 3], &['A', 'B']);
    assert_eq!(result.width, 2);
    assert!(result.complements.is_empty());
    assert_eq!(result.expression, "1");
    assert!(result.binary_groups.is_empty());
}

#[test]
fn two_variable_single_minterm() {
    let result = minimize(&[0], &['A', 'B']);
    assert_eq!(result.width, 2);
    assert_eq!(result.complements, vec![1, 2, 3]);
    assert_eq!(result.iterations.len(), 1);

    let covered: HashSet<u32> = result
        .prime_implicants
        .iter()
        .flat_map(|pi| result.pi_coverage.rows(pi).to_vec())
        .collect();
    assert_eq!(covered, HashSet::from([1, 2, 3]));

    for row in 0..4 {
        assert_eq!(result.evaluate(row), row == 0, "row = {}", row);
    }
}

#[test]
fn single_group_promoted_without_rounds() {
    // Complements {1, 2} share popcount 1, so no round runs at all.
    let result = minimize(&[0, 3], &['A', 'B']);
    assert_eq!(result.complements, vec![1, 2]);
    assert_eq!(result.binary_groups.len_keys(), 1);
    assert!(result.iterations.is_empty());
    assert_eq!(names(&result.prime_implicants), ["01", "10"]);
    assert_eq!(names(&result.essential_pis), ["01", "10"]);
    assert!(result.additional_pis.is_empty());
    assert_eq!(result.expression, "(A + B')(A' + B)");
    for row in 0..4 {
        assert_eq!(result.evaluate(row), row == 0 || row == 3, "row = {}", row);
    }
}

#[test]
fn minterm_wider_than_variables() {
    // 4 needs three bits; only the leading position maps onto 'A'.
    let result = minimize(&[4], &['A']);
    assert_eq!(result.width, 3);
    assert_eq!(result.complements, vec![0, 1, 2, 3, 5, 6, 7]);
    assert_eq!(names(&result.prime_implicants), ["0__", "__1", "_1_"]);
    assert_eq!(result.term_breakdown, ["A", "0", "0"]);
    assert_eq!(result.expression, "(A)(0)(0)");
}

// ─── Result record ─────────────────────────────────────────────────────────────

#[test]
fn record_echoes_input() {
    let result = minimize(&[3, 5, 6], &['X', 'Y', 'Z']);
    assert_eq!(result.minterms, vec![3, 5, 6]);
    assert_eq!(result.variables, vec!['X', 'Y', 'Z']);
}

#[test]
fn groups_are_aligned() {
    let result = minimize(&[1, 6], &VARIABLES);
    assert_eq!(result.binary_groups.total(), result.complements.len());
    for ((k1, terms), (k2, rows)) in result.binary_groups.iter().zip(result.minterm_groups.iter()) {
        assert_eq!(k1, k2);
        for (term, &row) in terms.iter().zip(rows) {
            assert_eq!(term, &Term::literal(row, result.width));
        }
    }
}

#[test]
fn iteration_trace() {
    // Complements {1, ..., 7}
    let result = minimize(&[0], &VARIABLES);
    assert_eq!(result.iterations.len(), 2);

    let first: Vec<String> = result.iterations[0].merges.iter().map(|m| m.to_string()).collect();
    assert_eq!(
        first,
        [
            "001 + 011 -> 0_1",
            "001 + 101 -> _01",
            "010 + 011 -> 01_",
            "010 + 110 -> _10",
            "100 + 101 -> 10_",
            "100 + 110 -> 1_0",
            "011 + 111 -> _11",
            "101 + 111 -> 1_1",
            "110 + 111 -> 11_",
        ]
    );
    assert!(result.iterations[0].unmatched.is_empty());
    assert_eq!(result.expression, "(C')(B')(A')");
}

#[test]
fn chart_display() {
    let result = minimize(&[0], &['A', 'B']);
    let expected = "PI | 1 | 2 | 3\n_1 | X |   | X\n1_ |   | X | X\n";
    assert_eq!(result.chart().to_string(), expected);
}

// ─── Properties ────────────────────────────────────────────────────────────────

fn check_properties(minterms: &[u32], variables: &[char], result: &Minimization) {
    let complements: HashSet<u32> = result.complements.iter().copied().collect();

    // Completeness
    let covered = result.pi_coverage.union_of(&result.prime_implicants);
    assert_eq!(covered.to_vec(), result.complements, "minterms = {:?}", minterms);

    // Cover soundness
    let covered = result.pi_coverage.union_of(&result.minimal_cover);
    assert_eq!(covered.to_vec(), result.complements, "minterms = {:?}", minterms);

    // Essential and additional implicants are disjoint and form the cover
    let essential: HashSet<&Term> = result.essential_pis.iter().collect();
    assert!(result.additional_pis.iter().all(|pi| !essential.contains(pi)));
    let concatenated: Vec<Term> = result
        .essential_pis
        .iter()
        .chain(&result.additional_pis)
        .cloned()
        .collect();
    assert_eq!(result.minimal_cover, concatenated);
    let unique: HashSet<&Term> = result.minimal_cover.iter().collect();
    assert_eq!(unique.len(), result.minimal_cover.len());

    // Prime implicants are unique and of full width
    let unique: HashSet<&Term> = result.prime_implicants.iter().collect();
    assert_eq!(unique.len(), result.prime_implicants.len());
    assert!(result.prime_implicants.iter().all(|pi| pi.len() == result.width));

    // Boolean equivalence
    if variables.len() == result.width {
        for row in 0..1u32 << result.width {
            assert_eq!(
                result.evaluate(row),
                !complements.contains(&row),
                "minterms = {:?}, row = {}, expression = {}",
                minterms,
                row,
                result.expression
            );
            assert_eq!(complements.contains(&row), !minterms.contains(&row));
        }
    }

    assert_eq!(result.term_breakdown.len(), result.minimal_cover.len());
    assert!(result.iterations.len() <= result.width);
}

#[test]
fn exhaustive_one_variable() {
    for minterms in all_functions(1) {
        let result = minimize(&minterms, &VARIABLES[..1]);
        check_properties(&minterms, &VARIABLES[..1], &result);
    }
}

#[test]
fn exhaustive_two_variables() {
    for minterms in all_functions(2) {
        let result = minimize(&minterms, &VARIABLES[..2]);
        check_properties(&minterms, &VARIABLES[..2], &result);
    }
}

#[test]
fn exhaustive_three_variables() {
    for minterms in all_functions(3) {
        let result = minimize(&minterms, &VARIABLES);
        check_properties(&minterms, &VARIABLES, &result);
    }
}

#[test]
fn idempotent() {
    for minterms in all_functions(3) {
        let a = minimize(&minterms, &VARIABLES);
        let b = minimize(&minterms, &VARIABLES);
        assert_eq!(a, b);
        assert_eq!(a.iterations, b.iterations);
    }
}

#[test]
fn four_variable_samples() {
    let vars = ['A', 'B', 'C', 'D'];
    let samples: [&[u32]; 4] = [
        &[0, 1, 2, 3, 7, 8, 9, 11, 15],
        &[0, 5, 10, 15],
        &[1, 2, 4, 7, 8, 11, 13, 14],
        &[0, 2, 8, 10, 5, 7, 13, 15],
    ];
    for minterms in samples {
        let result = minimize(minterms, &vars);
        check_properties(minterms, &vars, &result);
    }
}

#[test]
#[should_panic(expected = "Minterm set must not be empty")]
fn empty_minterms_panics() {
    minimize(&[], &['A']);
}
