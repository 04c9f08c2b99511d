//! # qmc-rs: Quine-McCluskey minimization in Rust
//!
//! **`qmc-rs`** minimizes a Boolean function, given by the rows where it is true,
//! into a **Product-of-Sums** expression, keeping a full trace of the classical
//! tabulation method along the way.
//!
//! ## How it works
//!
//! The pipeline runs four stages, each consuming the previous one's output:
//!
//! 1. **Complements** ([`complement`]): every row *not* listed as a minterm is a zero of the function.
//! 2. **Grouping** ([`group`]): complements are bucketed by the number of ones in their binary form.
//! 3. **Merging** ([`merge`]): terms from adjacent buckets differing in a single position are merged
//!    into a pattern with a don't-care (`_`) there, round after round. Terms that never merge are
//!    the prime implicants.
//! 4. **Chart reduction** ([`chart`], [`expr`]): essential prime implicants are selected first,
//!    the rest of the OFF-set is covered greedily, and the cover is rendered as a product of sums.
//!
//! ## Basic Usage
//!
//! ```rust
//! use qmc_rs::minimize::minimize;
//!
//! // f(A, B, C) is true on rows 0, 1, 2, 3 and 7
//! let result = minimize(&[0, 1, 2, 3, 7], &['A', 'B', 'C']);
//!
//! assert_eq!(result.complements, vec![4, 5, 6]);
//! assert_eq!(result.expression, "(A' + B)(A' + C)");
//!
//! // The expression is false exactly on the complements
//! for row in 0..8 {
//!     assert_eq!(result.evaluate(row), !result.complements.contains(&row));
//! }
//! ```
//!
//! The greedy part of the chart reduction is a heuristic: the cover is always valid,
//! but not guaranteed to be the smallest one.

pub mod chart;
pub mod complement;
pub mod expr;
pub mod group;
pub mod merge;
pub mod minimize;
pub mod rowset;
pub mod term;
