//! Near-duplicate detection over token sets
//!
//! Responses are compared as sets of lowercased content words. Jaccard
//! overlap above the threshold marks a near-duplicate. Crude on purpose:
//! catches copy-through and batch-split artifacts, not paraphrase.

use std::collections::HashSet;

/// Overlap above this ratio counts as a near-duplicate
pub const OVERLAP_THRESHOLD: f64 = 0.8;

/// Words this short carry no signal
const MIN_TOKEN_LENGTH: usize = 4;

const STOPWORDS: [&str; 24] = [
    "this", "that", "with", "from", "have", "will", "would", "should", "could", "there",
    "their", "which", "when", "what", "where", "been", "being", "into", "more", "most",
    "over", "such", "than", "then",
];

/// Token set of a response: lowercased words of useful length, stopwords removed
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= MIN_TOKEN_LENGTH)
        .map(str::to_lowercase)
        .filter(|word| !STOPWORDS.contains(&word.as_str()))
        .collect()
}

/// Jaccard overlap of two token sets, 0 when either is empty
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Token overlap ratio between two texts
pub fn token_overlap(a: &str, b: &str) -> f64 {
    jaccard(&tokenize(a), &tokenize(b))
}
