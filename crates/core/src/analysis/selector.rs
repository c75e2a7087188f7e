use super::similarity::score;

/// A function of binary B offered to the selector, already canonicalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub name: &'a str,
    pub body: &'a str,
}

impl<'a> Candidate<'a> {
    pub fn new(name: &'a str, body: &'a str) -> Self {
        Self { name, body }
    }
}

/// The winning candidate of a selection, with its position in the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    pub index: usize,
    pub name: &'a str,
    pub score: u8,
}

/// Pick the highest-scoring candidate for `body`, scanning `candidates` in order.
///
/// Returns `("", 0)` when there are no candidates.
pub fn select_best<'a, I>(body: &str, candidates: I) -> (&'a str, u8)
where
    I: IntoIterator<Item = Candidate<'a>>,
{
    select_best_candidate(body, candidates)
        .map(|selection| (selection.name, selection.score))
        .unwrap_or(("", 0))
}

/// Like [`select_best`], but keeps the position of the winner so that candidates
/// sharing a name stay distinguishable. `None` when there are no candidates.
pub fn select_best_candidate<'a, I>(body: &str, candidates: I) -> Option<Selection<'a>>
where
    I: IntoIterator<Item = Candidate<'a>>,
{
    fold_best(candidates.into_iter().map(|candidate| (candidate.name, score(body, candidate.body))))
}

/// Fold already-scored candidates into the best one.
///
/// The first candidate seeds the accumulator and a later one replaces it only with a
/// strictly greater score, so the earliest candidate wins every tie.
pub fn best_of<'a, I>(scored: I) -> (&'a str, u8)
where
    I: IntoIterator<Item = (&'a str, u8)>,
{
    fold_best(scored).map(|selection| (selection.name, selection.score)).unwrap_or(("", 0))
}

fn fold_best<'a, I>(scored: I) -> Option<Selection<'a>>
where
    I: IntoIterator<Item = (&'a str, u8)>,
{
    scored.into_iter().enumerate().fold(
        None,
        |best: Option<Selection<'a>>, (index, (name, candidate_score))| match best {
            Some(current) if candidate_score <= current.score => best,
            _ => Some(Selection { index, name, score: candidate_score }),
        },
    )
}
