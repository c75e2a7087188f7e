use std::collections::HashSet;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::selector::{select_best_candidate, Candidate};
use crate::model::{DecompiledFunction, MatchMap, MatchRecord};

/// What to do when binary A holds several functions with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The function discovered last owns the name in the result mapping.
    #[default]
    LastWins,
    /// Refuse to build a mapping that would silently drop a function.
    Reject,
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Duplicate function name '{0}' in the source binary")]
    DuplicateFunctionName(String),
    #[error("Failed to start matching workers: {0}")]
    WorkerPool(String),
}

/// Match every function of `a` against the functions of `b` on the current thread.
pub fn aggregate(a: &[DecompiledFunction], b: &[DecompiledFunction]) -> MatchMap {
    let candidates = canonical_candidates(b);
    into_match_map(a.iter().map(|function| match_one(function, &candidates)))
}

/// Match every function of `a` against `b`, spreading the functions of `a` over a
/// pool of `workers` threads (`None` or `Some(0)` lets rayon decide).
///
/// Each function's scan over `b` stays sequential, and records are merged in the
/// discovery order of `a`, so the result equals [`aggregate`]. `on_progress` is
/// called once per finished function of `a`, from worker threads.
pub fn aggregate_parallel<F>(
    a: &[DecompiledFunction],
    b: &[DecompiledFunction],
    workers: Option<usize>,
    on_progress: F,
) -> Result<MatchMap, MatchError>
where
    F: Fn() + Sync,
{
    let candidates = canonical_candidates(b);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.unwrap_or(0))
        .build()
        .map_err(|e| MatchError::WorkerPool(e.to_string()))?;

    let records: Vec<MatchRecord> = pool.install(|| {
        a.par_iter()
            .map(|function| {
                let record = match_one(function, &candidates);
                on_progress();
                record
            })
            .collect()
    });

    Ok(into_match_map(records))
}

/// Names that occur more than once in `functions`, in order of first repetition.
pub fn find_duplicate_names(functions: &[DecompiledFunction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for function in functions {
        let name = function.function_name.as_str();
        if !seen.insert(name) && reported.insert(name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}

/// Enforce `policy` on the function names of binary A.
pub fn check_duplicates(
    functions: &[DecompiledFunction],
    policy: DuplicatePolicy,
) -> Result<(), MatchError> {
    if policy == DuplicatePolicy::Reject {
        if let Some(name) = find_duplicate_names(functions).into_iter().next() {
            return Err(MatchError::DuplicateFunctionName(name));
        }
    }
    Ok(())
}

fn canonical_candidates(functions: &[DecompiledFunction]) -> Vec<Candidate<'_>> {
    functions
        .iter()
        .map(|function| Candidate::new(&function.function_name, function.canonical_body()))
        .collect()
}

fn match_one(function: &DecompiledFunction, candidates: &[Candidate<'_>]) -> MatchRecord {
    match select_best_candidate(function.canonical_body(), candidates.iter().copied()) {
        Some(selection) => {
            debug!("{} -> {} ({}%)", function.function_name, selection.name, selection.score);
            MatchRecord::new(&function.function_name, selection.name, selection.score)
                .with_matched_index(selection.index)
        }
        None => {
            debug!("{} -> (no candidates)", function.function_name);
            MatchRecord::new(&function.function_name, "", 0)
        }
    }
}

fn into_match_map<I>(records: I) -> MatchMap
where
    I: IntoIterator<Item = MatchRecord>,
{
    let mut map = MatchMap::new();
    for record in records {
        map.insert(record.source_function_name.clone(), record);
    }
    map
}
