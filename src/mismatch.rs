//! Detection of likely mispronounced words
//!
//! A prefix-aligned character-overlap heuristic, not a true alignment: it is
//! deliberately biased toward words sharing a common stem, so "learn" vs
//! "learning" rates high while "new" vs "knew" does not.

use crate::text::normalize;

/// Tokens at or below this length are function words too short to judge.
const MIN_TOKEN_LEN: usize = 3;

/// Flagging threshold on the best per-word similarity.
const MISMATCH_THRESHOLD: f64 = 0.7;

/// Original-phrase words judged likely mispronounced, in original order,
/// duplicates preserved.
pub fn find_mismatches(original: &str, spoken: &str) -> Vec<String> {
    let spoken_tokens: Vec<Vec<char>> = spoken
        .split_whitespace()
        .map(|t| normalize(t).chars().collect::<Vec<char>>())
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .collect();

    let mut mismatched = Vec::new();
    for raw in original.split_whitespace() {
        let token = normalize(raw);
        let chars: Vec<char> = token.chars().collect();
        if chars.len() < MIN_TOKEN_LEN {
            continue;
        }
        let best = spoken_tokens
            .iter()
            .map(|candidate| token_similarity(&chars, candidate))
            .fold(0.0_f64, f64::max);
        if best < MISMATCH_THRESHOLD {
            mismatched.push(token);
        }
    }
    mismatched
}

/// Share of positions with equal characters, over the longer token.
fn token_similarity(a: &[char], b: &[char]) -> f64 {
    let overlap = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    overlap as f64 / a.len().max(b.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_phrases_have_no_mismatches() {
        assert!(find_mismatches("the sun is shining today", "the sun is shining today").is_empty());
    }

    #[test]
    fn dropped_word_is_flagged() {
        let mismatches = find_mismatches("I like learning new languages.", "I like learning languages.");
        assert_eq!(mismatches, vec!["new"]);
    }

    #[test]
    fn short_tokens_are_skipped() {
        // "is" and "a" are too short to judge even when absent from speech
        assert!(find_mismatches("is a", "completely unrelated").is_empty());
    }

    #[test]
    fn common_stem_is_not_flagged() {
        // 7 of 8 aligned positions match: 0.875 >= threshold
        assert!(find_mismatches("learning", "learnings are hard").is_empty());
    }

    #[test]
    fn no_surviving_spoken_tokens_flags_everything() {
        assert_eq!(find_mismatches("shining today", "a"), vec!["shining", "today"]);
    }

    #[test]
    fn duplicates_and_order_are_preserved() {
        let mismatches = find_mismatches("wonder upon wonder", "xxx upon yyy");
        assert_eq!(mismatches, vec!["wonder", "wonder"]);
    }
}
