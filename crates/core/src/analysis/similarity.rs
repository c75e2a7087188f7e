//! Normalized edit-distance similarity between two canonical bodies.
//!
//! The distance counts single-character insertions and deletions at cost 1 and
//! substitutions at cost 2, so it equals `|a| + |b| - 2 * LCS(a, b)`. The score is
//! `100 * (|a| + |b| - distance) / (|a| + |b|)`, rounded half to even.

/// Similarity of `a` and `b` as an integer in `0..=100`.
///
/// Identical strings (including two empty strings) score 100; an empty string
/// against a non-empty one scores 0. The score is symmetric.
pub fn score(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }

    let distance = indel_distance(&a, &b);
    ratio_percent(total - distance, total)
}

/// Weighted edit distance over `char`s using two rolling DP rows sized by the
/// shorter input.
pub fn indel_distance(a: &[char], b: &[char]) -> usize {
    let (a, b) = strip_common_affixes(a, b);
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr: Vec<usize> = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            curr[j + 1] = if lc == sc {
                prev[j]
            } else {
                // A substitution costs the same as a deletion plus an insertion.
                (prev[j + 1] + 1).min(curr[j] + 1)
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

fn strip_common_affixes<'a>(a: &'a [char], b: &'a [char]) -> (&'a [char], &'a [char]) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let suffix = a.iter().rev().zip(b.iter().rev()).take_while(|(x, y)| x == y).count();
    (&a[..a.len() - suffix], &b[..b.len() - suffix])
}

fn ratio_percent(matched: usize, total: usize) -> u8 {
    let scaled = matched as u64 * 100;
    let total = total as u64;
    let mut quotient = scaled / total;
    let remainder = scaled % total;
    if 2 * remainder > total || (2 * remainder == total && quotient % 2 == 1) {
        quotient += 1;
    }
    quotient.min(100) as u8
}
