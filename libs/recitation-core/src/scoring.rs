//! Similarity scoring for recitation attempts.

use crate::normalize::normalize;

/// Length of the longest common subsequence of two character sequences.
pub fn lcs_length(a: &[char], b: &[char]) -> usize {
    let n = b.len();
    if a.is_empty() || n == 0 {
        return 0;
    }

    // Two rows of the (len(a)+1) x (len(b)+1) table
    let mut prev = vec![0usize; n + 1];
    let mut curr = vec![0usize; n + 1];

    for &ca in a {
        for j in 1..=n {
            curr[j] = if ca == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity between a reference and an attempt, from 0.0 to 1.0.
///
/// Both strings are normalized first. The ratio is the LCS length over the
/// longer string's length, so omissions and insertions cost less than
/// reordering. Either string normalizing to empty gives 0.0.
pub fn similarity(reference: &str, attempt: &str) -> f64 {
    let a: Vec<char> = normalize(reference).chars().collect();
    let b: Vec<char> = normalize(attempt).chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    lcs_length(&a, &b) as f64 / a.len().max(b.len()) as f64
}

/// Similarity scaled to a whole-number score from 0 to 100.
pub fn score(reference: &str, attempt: &str) -> u8 {
    to_score(similarity(reference, attempt))
}

pub(crate) fn to_score(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}
