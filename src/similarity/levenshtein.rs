//! Levenshtein edit distance algorithm.
//!
//! Unit cost for insertion, deletion and substitution. Characters are
//! compared by exact `char` equality; callers normalize beforehand.

use tracing::warn;

use crate::error::{ScoreError, ScoreResult};

/// Default maximum character count for either input.
///
/// The cost is O(m*n) time; with two rolling rows the memory is O(min(m, n)).
/// 10,000 covers any realistic free-text answer.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 10_000;

/// Compute the Levenshtein edit distance between two strings.
///
/// Returns the minimum number of single-character edits (insertions,
/// deletions, substitutions) required to transform `a` into `b`. Total for
/// any input; see [`bounded_distance`] for the length-checked variant.
#[must_use]
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    distance_chars(&a_chars, &b_chars)
}

/// Like [`distance`], but rejects inputs longer than `max_chars` characters
/// with [`ScoreError::InputTooLarge`] before any row is allocated.
pub fn bounded_distance(a: &str, b: &str, max_chars: usize) -> ScoreResult<usize> {
    check_len(a.chars().count(), max_chars)?;
    check_len(b.chars().count(), max_chars)?;
    Ok(distance(a, b))
}

/// Reject a length above `limit`.
pub(crate) fn check_len(len: usize, limit: usize) -> ScoreResult<()> {
    if len > limit {
        warn!(len, limit, "rejecting oversized input");
        return Err(ScoreError::InputTooLarge { len, limit });
    }
    Ok(())
}

pub(crate) fn distance_chars(a: &[char], b: &[char]) -> usize {
    // Keep the shorter sequence as the row.
    let (a, b) = if a.len() < b.len() { (b, a) } else { (a, b) };
    let m = a.len();
    let n = b.len();

    if n == 0 {
        return m;
    }

    // Two rows instead of the full (m+1) x (n+1) table.
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
