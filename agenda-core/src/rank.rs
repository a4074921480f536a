//! Fuzzy ranking of candidate strings against a free-text query.
//!
//! The score of a pair is the best of three normalized-Levenshtein views:
//! the whole strings, the best query-sized character window of the
//! candidate, and the token-sorted strings. Scores land on a 0-100 scale.

use strsim::normalized_levenshtein;

/// A candidate with its similarity score (0-100).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedResult {
    pub candidate: String,
    pub score: u32,
}

/// Rank `candidates` against `query`, best first, at most `k` results.
///
/// Ties keep their original candidate order; the input is not mutated. An
/// empty candidate list or `k == 0` yields an empty result.
pub fn rank(query: &str, candidates: &[String], k: usize) -> Vec<RankedResult> {
    let mut results: Vec<RankedResult> = candidates
        .iter()
        .map(|candidate| RankedResult {
            candidate: candidate.clone(),
            score: score(query, candidate),
        })
        .collect();

    // Stable sort keeps input order between equal scores.
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(k);
    results
}

/// Similarity of `query` and `candidate` on a 0-100 scale.
fn score(query: &str, candidate: &str) -> u32 {
    let query = query.to_lowercase();
    let candidate = candidate.to_lowercase();

    let full = normalized_levenshtein(&query, &candidate);
    let windowed = best_window(&query, &candidate);
    let token_sorted = normalized_levenshtein(&sort_tokens(&query), &sort_tokens(&candidate));

    let best = full.max(windowed).max(token_sorted);
    (best * 100.0).round() as u32
}

/// Best similarity between the shorter string and any equally long
/// character window of the longer one. Rewards substring-like matches the
/// whole-string distance would drown in surrounding text.
fn best_window(a: &str, b: &str) -> f64 {
    let (needle, haystack) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let needle_len = needle.chars().count();
    if needle_len == 0 {
        return 0.0;
    }

    let haystack: Vec<char> = haystack.chars().collect();
    let mut best = 0.0f64;
    for window in haystack.windows(needle_len) {
        let window: String = window.iter().collect();
        best = best.max(normalized_levenshtein(needle, &window));
    }
    best
}

/// Rebuild a string with its whitespace-separated tokens sorted, making
/// the comparison insensitive to token order.
fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
