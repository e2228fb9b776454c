//! Similarity scoring between a target phrase and its spoken rendition

use strsim::levenshtein;
use tracing::debug;

use crate::text::{normalize, tokenize};

/// Levenshtein distance over characters of the two strings.
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// Score how closely `spoken` matches `original`, 0-100.
///
/// Blends two signals: a word-match ratio (rewards correct vocabulary
/// recall) weighted 0.6, and a whole-string edit-distance ratio (credits
/// near-misses like partial words and transpositions) weighted 0.4.
pub fn similarity(original: &str, spoken: &str) -> u8 {
    if original.is_empty() || spoken.is_empty() {
        return 0;
    }

    let original_norm = normalize(original);
    let spoken_norm = normalize(spoken);
    let original_words = tokenize(&original_norm);
    let spoken_words = tokenize(&spoken_norm);

    let word_count = original_words.len().max(spoken_words.len());
    let word_score = if word_count == 0 {
        0.0
    } else {
        let matches = spoken_words
            .iter()
            .filter(|w| original_words.contains(w))
            .count();
        ((matches as f64 / word_count as f64) * 100.0).round().min(100.0)
    };

    let max_len = original_norm.chars().count().max(spoken_norm.chars().count());
    let edit_score = if max_len == 0 {
        100.0
    } else {
        let distance = edit_distance(&original_norm, &spoken_norm);
        (((max_len - distance) as f64 / max_len as f64) * 100.0).round()
    };

    let blended = (0.6 * word_score + 0.4 * edit_score).round().clamp(0.0, 100.0);
    debug!(word_score, edit_score, blended, "scored attempt");
    blended as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_of_identical_strings_is_zero() {
        assert_eq!(edit_distance("kitten", "kitten"), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(edit_distance("kitten", "sitting"), edit_distance("sitting", "kitten"));
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn distance_satisfies_triangle_inequality() {
        let (a, b, c) = ("sunday", "saturday", "monday");
        assert!(edit_distance(a, c) <= edit_distance(a, b) + edit_distance(b, c));
    }

    #[test]
    fn identical_phrases_score_100() {
        assert_eq!(similarity("The sun is shining today.", "The sun is shining today."), 100);
        assert_eq!(similarity("word", "word"), 100);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(similarity("", "anything"), 0);
        assert_eq!(similarity("anything", ""), 0);
        assert_eq!(similarity("", ""), 0);
    }

    #[test]
    fn disjoint_phrases_score_low_but_may_be_nonzero() {
        let score = similarity("completely different words", "zzz qqq xxx");
        assert!(score < 50, "got {score}");
    }

    #[test]
    fn dropped_word_lands_in_middle_band() {
        let score = similarity("I like learning new languages.", "I like learning languages.");
        assert!((60..=90).contains(&score), "got {score}");
    }

    #[test]
    fn case_and_punctuation_do_not_matter() {
        assert_eq!(similarity("Hello, world!", "hello world"), 100);
    }
}
