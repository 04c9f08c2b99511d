//! Iterative merging of adjacent popcount groups into prime implicants.
//!
//! Each round reads the groups produced by the previous round and writes a
//! fresh set of groups, so a term merged in round `r` is never compared again
//! within the same round. A term that finds no partner in its round is maximal
//! and becomes a prime implicant.
//!
//! ```
//! use qmc_rs::complement::derive_complements;
//! use qmc_rs::group::group_by_popcount;
//! use qmc_rs::merge::find_prime_implicants;
//!
//! let complements = derive_complements(&[0], &['A', 'B']);
//! let (binary, minterms) = group_by_popcount(&complements);
//! let outcome = find_prime_implicants(&binary, &minterms);
//!
//! let primes: Vec<String> = outcome.prime_implicants.iter().map(|t| t.to_string()).collect();
//! assert_eq!(primes, ["_1", "1_"]);
//! assert_eq!(outcome.iterations.len(), 1);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use log::debug;

use crate::group::PopcountGroups;
use crate::rowset::RowSet;
use crate::term::Term;

/// Mapping from each discovered term to the rows it subsumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    map: BTreeMap<Term, RowSet>,
}

impl Coverage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: Term, rows: RowSet) {
        self.map.insert(term, rows);
    }

    pub fn get(&self, term: &Term) -> Option<&RowSet> {
        self.map.get(term)
    }

    /// Rows covered by `term`, or an empty set for an unknown term.
    pub fn rows(&self, term: &Term) -> RowSet {
        self.get(term).cloned().unwrap_or_default()
    }

    pub fn covers(&self, term: &Term, row: u32) -> bool {
        self.get(term).is_some_and(|rows| rows.contains(row))
    }

    /// Union of the coverage of all `terms`.
    pub fn union_of<'a>(&self, terms: impl IntoIterator<Item = &'a Term>) -> RowSet {
        let mut rows = RowSet::empty();
        for term in terms {
            if let Some(r) = self.get(term) {
                rows.union_with(r);
            }
        }
        rows
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &RowSet)> + '_ {
        self.map.iter()
    }
}

/// Insertion-ordered set of terms.
#[derive(Debug, Clone, Default)]
pub struct ImplicantSet {
    order: Vec<Term>,
    seen: HashSet<Term>,
}

impl ImplicantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term. Returns true if it was not present yet.
    pub fn insert(&mut self, term: Term) -> bool {
        if self.seen.contains(&term) {
            return false;
        }
        self.seen.insert(term.clone());
        self.order.push(term);
        true
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.seen.contains(term)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_vec(self) -> Vec<Term> {
        self.order
    }
}

/// One successful merge: two parents differing in a single position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge {
    pub from: (Term, Term),
    pub to: Term,
}

impl fmt::Display for Merge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} -> {}", self.from.0, self.from.1, self.to)
    }
}

/// Trace of a single merge round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Iteration {
    /// Newly produced terms, in discovery order.
    pub merges: Vec<Merge>,
    /// Terms of this round that found no partner.
    pub unmatched: Vec<Term>,
}

impl fmt::Display for Iteration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for merge in &self.merges {
            writeln!(f, "  {}", merge)?;
        }
        if self.unmatched.is_empty() {
            write!(f, "  unmatched: none")
        } else {
            let names: Vec<String> = self.unmatched.iter().map(|t| t.to_string()).collect();
            write!(f, "  unmatched: {}", names.join(", "))
        }
    }
}

/// Result of the merge engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Prime implicants in discovery order, without duplicates.
    pub prime_implicants: Vec<Term>,
    /// Rows subsumed by every term ever produced, literal terms included.
    pub coverage: Coverage,
    /// One record per merge round.
    pub iterations: Vec<Iteration>,
}

/// Runs merge rounds until no adjacent groups can be merged.
///
/// `binary_groups` and `minterm_groups` must be index-aligned per key.
pub fn find_prime_implicants(
    binary_groups: &PopcountGroups<Term>,
    minterm_groups: &PopcountGroups<u32>,
) -> MergeOutcome {
    let width = binary_groups.width();

    let mut coverage = Coverage::new();
    for ((_, terms), (_, rows)) in binary_groups.iter().zip(minterm_groups.iter()) {
        assert_eq!(terms.len(), rows.len(), "Binary and minterm groups must be aligned");
        for (term, &row) in terms.iter().zip(rows) {
            coverage.insert(term.clone(), [row].into_iter().collect());
        }
    }

    let mut primes = ImplicantSet::new();
    let mut iterations = Vec::new();
    let mut current = binary_groups.clone();
    let mut changes_made = true;

    while changes_made && current.len_keys() > 1 {
        changes_made = false;
        let mut next = PopcountGroups::new(width);
        let mut used: HashSet<Term> = HashSet::new();
        let mut iteration = Iteration::default();

        let keys: Vec<usize> = current.keys().collect();
        for pair in keys.windows(2) {
            let (key, next_key) = (pair[0], pair[1]);
            // Only strictly adjacent popcounts can differ in a single position.
            if next_key - key != 1 {
                continue;
            }

            for a in current.get(key) {
                for b in current.get(next_key) {
                    let Some(merged) = a.merge(b) else {
                        continue;
                    };

                    if !next.contains(key, &merged) {
                        let mut rows = coverage.rows(a);
                        rows.union_with(&coverage.rows(b));
                        coverage.insert(merged.clone(), rows);
                        next.push(key, merged.clone());
                        iteration.merges.push(Merge {
                            from: (a.clone(), b.clone()),
                            to: merged,
                        });
                    }

                    used.insert(a.clone());
                    used.insert(b.clone());
                    changes_made = true;
                }
            }
        }

        for term in current.items() {
            if !used.contains(term) {
                iteration.unmatched.push(term.clone());
                primes.insert(term.clone());
            }
        }

        if !changes_made && !next.is_empty() {
            for term in next.items() {
                primes.insert(term.clone());
            }
        }

        debug!(
            "round {}: {} merges, unmatched = {:?}",
            iterations.len() + 1,
            iteration.merges.len(),
            iteration.unmatched
        );

        current = next;
        iterations.push(iteration);

        debug_assert!(
            iterations.len() <= width,
            "Merge engine exceeded {} rounds",
            width
        );
    }

    for term in current.items() {
        primes.insert(term.clone());
    }

    debug!(
        "find_prime_implicants: {} prime implicants after {} rounds",
        primes.len(),
        iterations.len()
    );

    MergeOutcome {
        prime_implicants: primes.into_vec(),
        coverage,
        iterations,
    }
}
