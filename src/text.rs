//! Text canonicalization for phrase comparison

/// Punctuation stripped before any comparison.
const PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Canonical lower-case, punctuation-stripped form of a string.
///
/// Internal whitespace is left as-is; callers that need words go through
/// [`tokenize`], which collapses runs.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split on whitespace into owned words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize("The sun is shining today."), "the sun is shining today");
        assert_eq!(normalize("Hello, World!"), "hello world");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("..."), "");
    }

    #[test]
    fn keeps_unicode_letters() {
        assert_eq!(normalize("O sol está brilhando!"), "o sol está brilhando");
    }

    #[test]
    fn tokenize_collapses_whitespace() {
        assert_eq!(tokenize("a  b   c"), vec!["a", "b", "c"]);
        assert!(tokenize("   ").is_empty());
    }
}
