//! Keyword similarity scoring and the candidate inclusion rule.
//!
//! Similarity is normalised inverse Levenshtein distance over lower-cased
//! Unicode scalar values:
//!
//! ```text
//! similarity(a, b) = 1 - distance(a, b) / max(len(a), len(b))
//! ```
//!
//! A candidate is included when its name or handle scores at least the
//! request threshold, or when its description mentions the keyword.

use crate::types::{CandidateAccount, MatchedAccount};

/// Normalised case-insensitive edit-distance similarity in `[0, 1]`.
///
/// Returns `1.0` exactly when the lower-cased strings are equal, including
/// when both are empty. Symmetric in its arguments.
///
/// # Examples
///
/// ```
/// use lookalike_search::orchestrator::scoring::similarity;
///
/// assert_eq!(similarity("Acme", "acme"), 1.0);
/// assert!((similarity("kitten", "sitting") - (1.0 - 3.0 / 7.0)).abs() < 1e-9);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

/// Levenshtein distance with unit costs, keeping two rows of the matrix.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Best similarity of the candidate's name or handle against `keyword`.
pub fn best_similarity(candidate: &CandidateAccount, keyword: &str) -> f64 {
    let by_name = similarity(&candidate.name, keyword);
    let by_handle = candidate
        .handle
        .as_deref()
        .map_or(0.0, |handle| similarity(handle, keyword));
    by_name.max(by_handle)
}

/// Whether the candidate's description contains `keyword`, ignoring case.
pub fn description_mentions(candidate: &CandidateAccount, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    if needle.is_empty() {
        return false;
    }
    candidate
        .description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(&needle))
}

/// Apply the inclusion rule, returning the matched account if it passes.
///
/// The threshold comparison is inclusive.
pub fn evaluate(
    candidate: CandidateAccount,
    keyword: &str,
    threshold: f64,
) -> Option<MatchedAccount> {
    let score = best_similarity(&candidate, keyword);
    if score >= threshold || description_mentions(&candidate, keyword) {
        Some(MatchedAccount {
            account: candidate,
            similarity: score,
        })
    } else {
        None
    }
}
