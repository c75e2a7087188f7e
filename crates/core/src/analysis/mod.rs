//! Similarity matching between two decompiled function sets.
//!
//! Leaf-first: [`canonical`] extracts the comparable body of a function,
//! [`similarity`] scores two bodies, [`selector`] picks the best candidate for
//! one function, and [`aggregate`] runs the selector across a whole binary.

pub mod aggregate;
pub mod canonical;
pub mod selector;
pub mod similarity;

pub use aggregate::{
    aggregate, aggregate_parallel, check_duplicates, find_duplicate_names, DuplicatePolicy,
    MatchError,
};
pub use canonical::canonicalize;
pub use selector::{best_of, select_best, select_best_candidate, Candidate, Selection};
pub use similarity::score;
