//! Prime-implicant chart and minimal cover selection.
//!
//! Rows of the chart are the prime implicants in discovery order, columns are
//! the complement rows in ascending order. Selection first takes every
//! *essential* implicant (the sole coverer of some column), then greedily adds
//! the candidate covering the most still-uncovered columns.
//!
//! The greedy step is a heuristic: ties go to the first candidate found, and
//! the result is a valid cover, not necessarily a minimum one.

use std::fmt;

use log::debug;

use crate::merge::{Coverage, ImplicantSet};
use crate::rowset::RowSet;
use crate::term::Term;

/// Prime-implicant chart.
#[derive(Debug, Clone)]
pub struct PiChart {
    implicants: Vec<Term>,
    columns: Vec<u32>,
    marks: Vec<RowSet>,
}

impl PiChart {
    pub fn new(prime_implicants: &[Term], coverage: &Coverage, complements: &[u32]) -> Self {
        let marks = prime_implicants.iter().map(|pi| coverage.rows(pi)).collect();
        Self {
            implicants: prime_implicants.to_vec(),
            columns: complements.to_vec(),
            marks,
        }
    }

    pub fn implicants(&self) -> &[Term] {
        &self.implicants
    }

    pub fn columns(&self) -> &[u32] {
        &self.columns
    }

    /// Rows covered by the implicant in chart row `row`.
    pub fn coverage(&self, row: usize) -> &RowSet {
        &self.marks[row]
    }

    pub fn is_marked(&self, row: usize, column: u32) -> bool {
        self.marks[row].contains(column)
    }

    /// Chart rows whose implicant covers `column`, in discovery order.
    pub fn covering(&self, column: u32) -> Vec<usize> {
        (0..self.implicants.len())
            .filter(|&row| self.is_marked(row, column))
            .collect()
    }
}

impl fmt::Display for PiChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self
            .implicants
            .iter()
            .map(Term::len)
            .max()
            .unwrap_or(0)
            .max(2);
        let cell_widths: Vec<usize> = self.columns.iter().map(|c| c.to_string().len()).collect();

        write!(f, "{:label_width$}", "PI")?;
        for column in &self.columns {
            write!(f, " | {}", column)?;
        }
        writeln!(f)?;

        for (row, pi) in self.implicants.iter().enumerate() {
            write!(f, "{:label_width$}", pi.to_string())?;
            for (&column, &w) in self.columns.iter().zip(&cell_widths) {
                let mark = if self.is_marked(row, column) { "X" } else { "" };
                write!(f, " | {:^w$}", mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Selected prime implicants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    /// Implicants that are the only coverer of some complement.
    pub essential: Vec<Term>,
    /// Greedily selected implicants covering what the essential ones leave.
    pub additional: Vec<Term>,
    /// `essential` followed by `additional`.
    pub minimal: Vec<Term>,
}

/// Reduces the chart to a cover of every column.
pub fn find_minimal_cover(chart: &PiChart) -> Cover {
    let mut essential = ImplicantSet::new();
    let mut essential_rows = Vec::new();
    for &column in chart.columns() {
        if let [row] = chart.covering(column).as_slice() {
            if essential.insert(chart.implicants()[*row].clone()) {
                essential_rows.push(*row);
            }
        }
    }

    let mut remaining: RowSet = chart.columns().iter().copied().collect();
    for &row in &essential_rows {
        remaining.difference_with(chart.coverage(row));
    }

    let mut candidates: Vec<usize> = (0..chart.implicants().len())
        .filter(|row| !essential_rows.contains(row))
        .collect();

    let mut additional = Vec::new();
    while !remaining.is_empty() && !candidates.is_empty() {
        let mut best = None;
        let mut max_coverage = 0;
        for (i, &row) in candidates.iter().enumerate() {
            let count = chart.coverage(row).intersection_len(&remaining);
            if count > max_coverage {
                max_coverage = count;
                best = Some(i);
            }
        }

        let Some(i) = best else {
            break;
        };
        let row = candidates.remove(i);
        remaining.difference_with(chart.coverage(row));
        additional.push(chart.implicants()[row].clone());
    }

    let essential = essential.into_vec();
    debug!(
        "find_minimal_cover: essential = {:?}, additional = {:?}",
        essential, additional
    );

    let minimal = essential.iter().chain(&additional).cloned().collect();
    Cover {
        essential,
        additional,
        minimal,
    }
}
