//! Text scanning helpers for document analysis
//!
//! Everything here is plain substring and word scanning. Word characters
//! are ASCII alphanumerics plus underscore, matching the tokenization the
//! scoring tables were tuned against.

/// Whether a character counts as part of a word
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Words of the text (runs of word characters)
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty())
}

/// Word count over whitespace splitting, used for complexity metrics
pub fn whitespace_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sentence fragments split on `.`, `!` or `?`, empty fragments removed
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Number of sentence segments, counting runs of terminators as one split
///
/// Mirrors splitting on `[.!?]+`: an empty trailing segment after final
/// punctuation still counts, so "a. b." yields three segments.
pub fn sentence_segment_count(text: &str) -> usize {
    let mut count = 1usize;
    let mut in_terminator = false;
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') {
            if !in_terminator {
                count += 1;
                in_terminator = true;
            }
        } else {
            in_terminator = false;
        }
    }
    count
}

/// Approximate syllable count of a word (vowel runs, at least one)
pub fn count_syllables(word: &str) -> usize {
    let mut count = 0usize;
    let mut previous_was_vowel = false;
    for c in word.to_lowercase().chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u');
        if is_vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = is_vowel;
    }
    count.max(1)
}

/// Flesch reading ease approximation over the whole text
pub fn reading_ease(text: &str) -> f64 {
    let words: Vec<&str> = words(text).collect();
    if words.is_empty() {
        return 0.0;
    }
    let sentence_count = sentence_segment_count(text) as f64;
    let word_count = words.len() as f64;
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    206.835 - 1.015 * (word_count / sentence_count) - 84.6 * (syllables as f64 / word_count)
}

/// Whether `needle` occurs in `haystack` bounded by non-word characters
///
/// Case-insensitive. Multi-word needles match across their embedded spaces.
pub fn has_word(haystack: &str, needle: &str) -> bool {
    count_word_matches(haystack, needle) > 0
}

/// Number of non-overlapping word-bounded occurrences of `needle`
pub fn count_word_matches(haystack: &str, needle: &str) -> usize {
    let haystack_lower = haystack.to_lowercase();
    let needle_lower = needle.to_lowercase();
    if needle_lower.is_empty() {
        return 0;
    }

    let mut count = 0usize;
    let mut offset = 0usize;
    while let Some(found) = haystack_lower[offset..].find(&needle_lower) {
        let start = offset + found;
        let end = start + needle_lower.len();
        let before_ok = haystack_lower[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !is_word_char(c));
        let after_ok = haystack_lower[end..]
            .chars()
            .next()
            .is_none_or(|c| !is_word_char(c));
        if before_ok && after_ok {
            count += 1;
            offset = end;
        } else {
            offset = start + 1;
        }
    }
    count
}

/// Case-insensitive occurrences of `needle`, captured in original casing
/// and document order
pub fn find_occurrences<'a>(haystack: &'a str, needle: &str) -> Vec<(usize, &'a str)> {
    let haystack_lower = haystack.to_lowercase();
    let needle_lower = needle.to_lowercase();
    let mut found = Vec::new();
    if needle_lower.is_empty() || haystack_lower.len() != haystack.len() {
        // Positions only line up when lowercasing preserves byte length;
        // fall back to a char-wise scan otherwise.
        return find_occurrences_charwise(haystack, &needle_lower);
    }

    let mut offset = 0usize;
    while let Some(pos) = haystack_lower[offset..].find(&needle_lower) {
        let start = offset + pos;
        let end = start + needle_lower.len();
        found.push((start, &haystack[start..end]));
        offset = end;
    }
    found
}

fn find_occurrences_charwise<'a>(haystack: &'a str, needle_lower: &str) -> Vec<(usize, &'a str)> {
    let needle_chars: Vec<char> = needle_lower.chars().collect();
    let mut found = Vec::new();
    let indices: Vec<(usize, char)> = haystack.char_indices().collect();

    let mut i = 0usize;
    while i < indices.len() {
        let mut matched = true;
        let mut j = 0usize;
        while j < needle_chars.len() {
            match indices.get(i + j) {
                Some((_, c)) if c.to_lowercase().eq(needle_chars[j].to_lowercase()) => {}
                _ => {
                    matched = false;
                    break;
                }
            }
            j += 1;
        }
        if matched {
            let start = indices[i].0;
            let end = indices
                .get(i + needle_chars.len())
                .map(|(pos, _)| *pos)
                .unwrap_or(haystack.len());
            found.push((start, &haystack[start..end]));
            i += needle_chars.len();
        } else {
            i += 1;
        }
    }
    found
}

/// Title heuristic: first non-empty line if reasonably short, headers
/// stripped of their leading hashes
pub fn extract_title(content: &str) -> String {
    if let Some(line) = content.lines().find(|line| !line.trim().is_empty())
        && line.chars().count() < 100
    {
        return line.trim_start_matches('#').trim().to_string();
    }
    "Technical Document".to_string()
}

/// First `n` sentences of a text, trimmed
pub fn first_sentences(text: &str, n: usize) -> Vec<String> {
    sentences(text).take(n).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_tokenization() {
        let collected: Vec<&str> = words("hello, data_models work-item").collect();
        assert_eq!(collected, vec!["hello", "data_models", "work", "item"]);
    }

    #[test]
    fn test_sentence_segment_count() {
        assert_eq!(sentence_segment_count("a. b."), 3);
        assert_eq!(sentence_segment_count("a.. b"), 2);
        assert_eq!(sentence_segment_count("no punctuation"), 1);
        assert_eq!(sentence_segment_count(""), 1);
    }

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("hello"), 2);
        assert_eq!(count_syllables("queue"), 1);
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("idea"), 2);
    }

    #[test]
    fn test_word_boundary_matching() {
        assert!(has_word("the api surface", "api"));
        assert!(!has_word("rapid growth", "api"));
        assert!(has_word("uses data_models heavily", "data_models"));
        assert!(has_word("a smart contract deployed", "smart contract"));
        assert_eq!(count_word_matches("ai and ai and aid", "ai"), 2);
    }

    #[test]
    fn test_find_occurrences_preserves_case() {
        let found = find_occurrences("An Algorithm and an algorithm", "algorithm");
        let captured: Vec<&str> = found.iter().map(|(_, s)| *s).collect();
        assert_eq!(captured, vec!["Algorithm", "algorithm"]);
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("# Protocol Overview\n\nBody"), "Protocol Overview");
        assert_eq!(extract_title("\n\nShort Title\ncontent"), "Short Title");
        let long_line = "x".repeat(120);
        assert_eq!(extract_title(&long_line), "Technical Document");
    }

    #[test]
    fn test_reading_ease_plain_text() {
        let ease = reading_ease("The cat sat. The dog ran.");
        assert!(ease > 90.0, "simple text should score high, got {ease}");
        assert_eq!(reading_ease(""), 0.0);
    }

    #[test]
    fn test_first_sentences() {
        let points = first_sentences("One. Two! Three? Four.", 3);
        assert_eq!(points, vec!["One", "Two", "Three"]);
    }
}
